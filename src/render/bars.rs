//! Bar reconciliation: the enter/update/exit lifecycle.
//!
//! Each render call partitions the relationship between the previously
//! bound bars and the incoming dataset into three disjoint sets by
//! identity key (the record's x value) and drives each set through the
//! tween scheduler. The scene is never torn down; stale bars animate out
//! and are swept once their exit transition completes.

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::anim::{AttrPath, BarAttr};
use crate::config::Palette;
use crate::core::{MappedRecord, XScale};
use crate::error::{ChartError, ChartResult};
use crate::render::context::RenderContext;
use crate::render::state::RenderState;
use crate::scene::{BarNode, Surface};

const ENTER_MS: f64 = 350.0;
const ENTER_DELAY_FIRST_MS: f64 = 150.0;
const ENTER_DELAY_MS: f64 = 100.0;
const EXIT_MS: f64 = 350.0;
const EXIT_DELAY_MS: f64 = 100.0;
const UPDATE_MS: f64 = 500.0;
const EXIT_OPACITY: f64 = 1e-6;

// Band-style slot padding used when the x axis is continuous (time) and
// there is no bandwidth to borrow.
const TIME_SLOT_PADDING: f64 = 0.05;

/// Final geometry for one bar, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Chart-kind geometry strategy: how one mapped record becomes a rect.
pub trait BarGeometry {
    fn compute(&self, record: &MappedRecord, ctx: &RenderContext<'_>) -> ChartResult<Rect>;
}

/// Upright bars anchored to the baseline, the one chart family this
/// engine supports.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalBars;

impl BarGeometry for VerticalBars {
    fn compute(&self, record: &MappedRecord, ctx: &RenderContext<'_>) -> ChartResult<Rect> {
        let y = ctx.y_scale.position(record.y);
        let height = ctx.plot.height - y;
        match &ctx.x_scale {
            XScale::Band(band) => {
                let x = band.position(&record.key).ok_or_else(|| {
                    ChartError::InvalidData(format!("`{}` is not in the band domain", record.key))
                })?;
                Ok(Rect {
                    x,
                    y,
                    width: band.bandwidth(),
                    height,
                })
            }
            XScale::Time(time) => {
                let instant = record.x_time.ok_or_else(|| {
                    ChartError::InvalidData("time axis record without parsed date".to_owned())
                })?;
                let step = ctx.plot.width / ctx.slot_count.max(1) as f64;
                let width = step * (1.0 - TIME_SLOT_PADDING);
                Ok(Rect {
                    x: time.position(instant) - width / 2.0,
                    y,
                    width,
                    height,
                })
            }
        }
    }
}

/// Three-way set difference between the previously bound keys and the
/// incoming ones, each side in its own order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcilePlan {
    pub to_create: Vec<String>,
    pub to_update: Vec<String>,
    pub to_remove: Vec<String>,
}

impl ReconcilePlan {
    #[must_use]
    pub fn compute(previous: &[String], incoming: &[String]) -> Self {
        let previous_set: IndexSet<&str> = previous.iter().map(String::as_str).collect();
        let incoming_set: IndexSet<&str> = incoming.iter().map(String::as_str).collect();

        let mut plan = Self::default();
        for key in incoming {
            if previous_set.contains(key.as_str()) {
                plan.to_update.push(key.clone());
            } else {
                plan.to_create.push(key.clone());
            }
        }
        for key in previous {
            if !incoming_set.contains(key.as_str()) {
                plan.to_remove.push(key.clone());
            }
        }
        plan
    }
}

/// Reconciles the bar group against the mapped dataset.
pub(crate) fn reconcile(
    ctx: &RenderContext<'_>,
    surface: &mut Surface,
    state: &mut RenderState,
    records: &[MappedRecord],
    geometry: &dyn BarGeometry,
    palette: &Palette,
) -> ChartResult<()> {
    let keys: Vec<String> = records.iter().map(|record| record.key.clone()).collect();

    // Compute every target rect before touching the scene, so a bad
    // record cannot leave the bar group half-reconciled.
    let mut targets: Vec<Rect> = Vec::with_capacity(records.len());
    for record in records {
        targets.push(geometry.compute(record, ctx)?);
    }

    if state.first_render() {
        // Nothing pre-exists: the simplified all-entering path.
        for (index, (key, rect)) in keys.iter().zip(&targets).enumerate() {
            enter_bar(surface, key, *rect, palette, index, ENTER_DELAY_FIRST_MS);
        }
        debug!(entered = keys.len(), "initial bar render");
    } else {
        let plan = ReconcilePlan::compute(&state.bound_keys, &keys);
        trace!(
            create = plan.to_create.len(),
            update = plan.to_update.len(),
            remove = plan.to_remove.len(),
            "reconcile plan"
        );

        for key in &plan.to_remove {
            exit_bar(surface, key, ctx.plot.height);
        }
        for (index, key) in keys.iter().enumerate() {
            let rect = targets[index];
            if plan.to_update.contains(key) {
                update_bar(surface, key, rect);
            } else if surface.bars.contains_key(key.as_str()) {
                // Re-entering while its exit transition is still in
                // flight: revive in place.
                revive_bar(surface, key, rect);
            } else {
                enter_bar(surface, key, rect, palette, index, ENTER_DELAY_MS);
            }
        }
        debug!(
            entered = plan.to_create.len(),
            updated = plan.to_update.len(),
            exited = plan.to_remove.len(),
            "reconciled bars"
        );
    }

    state.bound_keys = keys;
    Ok(())
}

fn bar_path(key: &str, attr: BarAttr) -> AttrPath {
    AttrPath::Bar {
        key: key.to_owned(),
        attr,
    }
}

fn enter_bar(
    surface: &mut Surface,
    key: &str,
    rect: Rect,
    palette: &Palette,
    index: usize,
    delay: f64,
) {
    let baseline = rect.y + rect.height;
    surface.bars.insert(
        key.to_owned(),
        BarNode {
            x: rect.x,
            y: baseline,
            width: rect.width,
            height: 0.0,
            opacity: 1.0,
            fill: palette.color(index),
            exiting: false,
        },
    );
    surface
        .scheduler
        .schedule_one(bar_path(key, BarAttr::Y), baseline, rect.y, delay, ENTER_MS);
    surface
        .scheduler
        .schedule_one(bar_path(key, BarAttr::Height), 0.0, rect.height, delay, ENTER_MS);
}

fn update_bar(surface: &mut Surface, key: &str, rect: Rect) {
    let Some(bar) = surface.bars.get_mut(key) else {
        return;
    };
    bar.exiting = false;
    let (x, y, width, height) = (bar.x, bar.y, bar.width, bar.height);
    surface
        .scheduler
        .schedule_one(bar_path(key, BarAttr::X), x, rect.x, 0.0, UPDATE_MS);
    surface
        .scheduler
        .schedule_one(bar_path(key, BarAttr::Y), y, rect.y, 0.0, UPDATE_MS);
    surface
        .scheduler
        .schedule_one(bar_path(key, BarAttr::Width), width, rect.width, 0.0, UPDATE_MS);
    surface
        .scheduler
        .schedule_one(bar_path(key, BarAttr::Height), height, rect.height, 0.0, UPDATE_MS);
}

fn revive_bar(surface: &mut Surface, key: &str, rect: Rect) {
    let opacity = match surface.bars.get_mut(key) {
        Some(bar) => {
            bar.exiting = false;
            bar.opacity
        }
        None => return,
    };
    surface.scheduler.cancel_bar(key);
    update_bar(surface, key, rect);
    surface
        .scheduler
        .schedule_one(bar_path(key, BarAttr::Opacity), opacity, 1.0, 0.0, UPDATE_MS);
}

fn exit_bar(surface: &mut Surface, key: &str, plot_height: f64) {
    let Some(bar) = surface.bars.get_mut(key) else {
        return;
    };
    bar.exiting = true;
    let (y, height, opacity) = (bar.y, bar.height, bar.opacity);
    surface.scheduler.schedule_one(
        bar_path(key, BarAttr::Y),
        y,
        plot_height,
        EXIT_DELAY_MS,
        EXIT_MS,
    );
    surface.scheduler.schedule_one(
        bar_path(key, BarAttr::Height),
        height,
        0.0,
        EXIT_DELAY_MS,
        EXIT_MS,
    );
    surface.scheduler.schedule_one(
        bar_path(key, BarAttr::Opacity),
        opacity,
        EXIT_OPACITY,
        EXIT_DELAY_MS,
        EXIT_MS,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn plan_partitions_into_disjoint_sets() {
        let plan = ReconcilePlan::compute(&keys(&["FR", "DE"]), &keys(&["DE", "IT"]));

        assert_eq!(plan.to_create, keys(&["IT"]));
        assert_eq!(plan.to_update, keys(&["DE"]));
        assert_eq!(plan.to_remove, keys(&["FR"]));
    }

    #[test]
    fn plan_for_identical_sets_is_all_update() {
        let plan = ReconcilePlan::compute(&keys(&["a", "b"]), &keys(&["a", "b"]));

        assert!(plan.to_create.is_empty());
        assert!(plan.to_remove.is_empty());
        assert_eq!(plan.to_update, keys(&["a", "b"]));
    }

    #[test]
    fn plan_for_empty_incoming_removes_everything() {
        let plan = ReconcilePlan::compute(&keys(&["a", "b"]), &[]);

        assert_eq!(plan.to_remove, keys(&["a", "b"]));
        assert!(plan.to_create.is_empty());
        assert!(plan.to_update.is_empty());
    }
}
