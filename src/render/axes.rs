//! Axis, gridline and label rendering.
//!
//! Every visual group here follows the same discipline: consult its own
//! RenderState flag, create the group if it is absent, otherwise
//! transition it to the new values. Visibility toggles are style flags
//! reapplied unconditionally after the axis pass, since transitions do
//! not preserve prior overrides.

use indexmap::IndexMap;

use crate::anim::{AttrPath, AxisKind, TickAttr, Tween, TweenChain};
use crate::config::{AxisSpec, ChartConfig};
use crate::core::{XScale, ticks};
use crate::render::context::RenderContext;
use crate::render::state::RenderState;
use crate::scene::{AxisGroup, GridGroup, LabelNode, Surface, TickNode};

const X_AXIS_MS: f64 = 500.0;
const Y_AXIS_MS: f64 = 550.0;
const GRID_FADE_OUT_MS: f64 = 200.0;
const GRID_FADE_IN_MS: f64 = 300.0;
const GRID_OPACITY: f64 = 0.7;
const GRID_HIDDEN_OPACITY: f64 = 1e-6;
const TICK_LABEL_ROTATION_DEG: f64 = -25.0;
const Y_LABEL_GAP_PX: f64 = 28.0;

/// One computed tick target: identity key, offset along the axis, label.
struct TickTarget {
    key: String,
    offset: f64,
    label: String,
}

fn x_tick_targets(ctx: &RenderContext<'_>) -> Vec<TickTarget> {
    let options = &ctx.config.axis.x.options;
    match &ctx.x_scale {
        XScale::Band(band) => band
            .domain()
            .enumerate()
            .filter(|(index, _)| ticks::band_tick_kept(*index, options.ticks.number))
            .map(|(_, value)| TickTarget {
                key: value.to_owned(),
                offset: band.position(value).unwrap_or_default() + band.bandwidth() / 2.0,
                label: value.to_owned(),
            })
            .collect(),
        XScale::Time(time) => {
            let format = ctx.config.axis.x.scale.format.as_deref().unwrap_or_default();
            let (start, end) = time.domain();
            ticks::time_ticks(start, end, options.ticks.number)
                .into_iter()
                .map(|instant| TickTarget {
                    key: format!("{instant}"),
                    offset: time.position(instant),
                    label: ticks::format_time(instant, format),
                })
                .collect()
        }
    }
}

fn y_tick_targets(ctx: &RenderContext<'_>) -> Vec<TickTarget> {
    let options = &ctx.config.axis.y.options;
    let (_, max) = ctx.y_scale.domain();
    ticks::linear_ticks(max, options.ticks.number)
        .into_iter()
        .map(|value| TickTarget {
            key: format!("{value}"),
            offset: ctx.y_scale.position(value),
            label: ticks::format_number(value, options.ticks.format.as_deref()),
        })
        .collect()
}

/// Creates or transitions one axis group.
fn render_axis(
    surface_axis: &mut Option<AxisGroup>,
    scheduler: &mut crate::anim::TweenScheduler,
    exists: &mut bool,
    axis: AxisKind,
    targets: Vec<TickTarget>,
    duration: f64,
) {
    let group = match surface_axis {
        Some(group) if *exists => group,
        _ => {
            let mut group = AxisGroup::default();
            for target in targets {
                group.ticks.insert(
                    target.key,
                    TickNode {
                        offset: target.offset,
                        label: target.label,
                        opacity: 1.0,
                    },
                );
            }
            *surface_axis = Some(group);
            *exists = true;
            return;
        }
    };
    let mut next: IndexMap<String, TickNode> = IndexMap::with_capacity(targets.len());
    for target in targets {
        match group.ticks.swap_remove(&target.key) {
            Some(node) => {
                // Matched tick: animate to its new position.
                scheduler.schedule_one(
                    AttrPath::Tick {
                        axis,
                        key: target.key.clone(),
                        attr: TickAttr::Offset,
                    },
                    node.offset,
                    target.offset,
                    0.0,
                    duration,
                );
                next.insert(
                    target.key,
                    TickNode {
                        label: target.label,
                        ..node
                    },
                );
            }
            None => {
                // New tick: appears in place and fades in.
                scheduler.schedule_one(
                    AttrPath::Tick {
                        axis,
                        key: target.key.clone(),
                        attr: TickAttr::Opacity,
                    },
                    0.0,
                    1.0,
                    0.0,
                    duration,
                );
                next.insert(
                    target.key,
                    TickNode {
                        offset: target.offset,
                        label: target.label,
                        opacity: 0.0,
                    },
                );
            }
        }
    }
    // Departed ticks drop immediately; orphan their tweens.
    for key in group.ticks.keys() {
        for attr in [TickAttr::Offset, TickAttr::Opacity] {
            scheduler.cancel(&AttrPath::Tick {
                axis,
                key: key.clone(),
                attr,
            });
        }
    }
    group.ticks = next;
}

pub(crate) fn render_x_axis(ctx: &RenderContext<'_>, surface: &mut Surface, state: &mut RenderState) {
    let targets = x_tick_targets(ctx);
    let Surface {
        x_axis, scheduler, ..
    } = surface;
    render_axis(x_axis, scheduler, &mut state.x_axis, AxisKind::X, targets, X_AXIS_MS);
}

pub(crate) fn render_y_axis(ctx: &RenderContext<'_>, surface: &mut Surface, state: &mut RenderState) {
    let targets = y_tick_targets(ctx);
    let Surface {
        y_axis, scheduler, ..
    } = surface;
    render_axis(y_axis, scheduler, &mut state.y_axis, AxisKind::Y, targets, Y_AXIS_MS);
}

fn render_grid(
    grid: &mut Option<GridGroup>,
    scheduler: &mut crate::anim::TweenScheduler,
    exists: &mut bool,
    axis: AxisKind,
    offsets: Vec<f64>,
    extent: f64,
) {
    let group = match grid {
        Some(group) if *exists => group,
        _ => {
            *grid = Some(GridGroup {
                offsets,
                extent,
                opacity: GRID_OPACITY,
                visible: true,
            });
            *exists = true;
            return;
        }
    };
    let opacity = group.opacity;
    group.offsets = offsets;
    group.extent = extent;
    // Fade out over the scale change, then back in.
    let now = scheduler.now();
    scheduler.schedule(
        AttrPath::GridOpacity { axis },
        TweenChain::pair(
            Tween {
                from: opacity,
                to: GRID_HIDDEN_OPACITY,
                start: now,
                duration: GRID_FADE_OUT_MS,
            },
            Tween {
                from: GRID_HIDDEN_OPACITY,
                to: GRID_OPACITY,
                start: now + GRID_FADE_OUT_MS,
                duration: GRID_FADE_IN_MS,
            },
        ),
    );
}

pub(crate) fn render_gridlines(
    ctx: &RenderContext<'_>,
    surface: &mut Surface,
    state: &mut RenderState,
) {
    if ctx.config.axis.x.options.gridlines {
        let offsets = match &ctx.x_scale {
            XScale::Band(band) => {
                let half_band = band.bandwidth() / 2.0;
                band.domain()
                    .filter_map(|value| band.position(value))
                    .map(|position| position + half_band)
                    .collect()
            }
            XScale::Time(time) => {
                let (start, end) = time.domain();
                ticks::time_ticks(start, end, ctx.config.axis.x.options.ticks.number)
                    .into_iter()
                    .map(|instant| time.position(instant))
                    .collect()
            }
        };
        let Surface {
            grid_x, scheduler, ..
        } = surface;
        render_grid(grid_x, scheduler, &mut state.grid_x, AxisKind::X, offsets, ctx.plot.height);
    }

    if ctx.config.axis.y.options.gridlines {
        let offsets = y_tick_targets(ctx)
            .into_iter()
            .map(|target| target.offset)
            .collect();
        let Surface {
            grid_y, scheduler, ..
        } = surface;
        render_grid(grid_y, scheduler, &mut state.grid_y, AxisKind::Y, offsets, ctx.plot.width);
    }
}

fn render_label(
    slot: &mut Option<LabelNode>,
    exists: &mut bool,
    spec_value: &str,
    spec_visible: bool,
    position: (f64, f64),
    rotation_deg: f64,
) {
    if *exists {
        if let Some(node) = slot {
            // Created once: only the text and display state change later.
            node.text = spec_value.to_owned();
            node.visible = spec_visible;
        }
    } else if spec_visible {
        *slot = Some(LabelNode {
            text: spec_value.to_owned(),
            x: position.0,
            y: position.1,
            rotation_deg,
            visible: true,
        });
        *exists = true;
    }
}

pub(crate) fn render_labels(ctx: &RenderContext<'_>, surface: &mut Surface, state: &mut RenderState) {
    let margin = &ctx.config.margin;
    let x_label = &ctx.config.axis.x.options.label;
    render_label(
        &mut surface.label_x,
        &mut state.label_x,
        &x_label.value,
        x_label.visible,
        (ctx.plot.width / 2.0, ctx.plot.height + margin.bottom),
        0.0,
    );

    let y_label = &ctx.config.axis.y.options.label;
    render_label(
        &mut surface.label_y,
        &mut state.label_y,
        &y_label.value,
        y_label.visible,
        (
            -margin.right - Y_LABEL_GAP_PX,
            ctx.plot.height / 2.0 - margin.top,
        ),
        -90.0,
    );

    render_label(
        &mut surface.title,
        &mut state.title,
        &ctx.config.title.value,
        ctx.config.title.visible,
        (ctx.plot.width / 2.0, -margin.top / 2.0),
        0.0,
    );
}

fn apply_axis_overrides(group: &mut AxisGroup, spec: &AxisSpec) {
    group.line_visible = spec.options.line.visible;
    group.ticks_visible = spec.options.ticks.visible;
    group.tick_labels_visible = spec.options.tick_labels.visible;
    group.tick_labels_rotated = spec.options.tick_labels.rotated;
}

/// Reapplies the visibility/rotation toggles after the axis pass. The
/// elements always exist in the scene; toggles merely hide, show or
/// rotate them.
pub(crate) fn apply_style_overrides(config: &ChartConfig, surface: &mut Surface) {
    if let Some(group) = surface.x_axis.as_mut() {
        apply_axis_overrides(group, &config.axis.x);
    }
    if let Some(group) = surface.y_axis.as_mut() {
        apply_axis_overrides(group, &config.axis.y);
    }
    if let Some(group) = surface.grid_x.as_mut() {
        group.visible = config.axis.x.options.gridlines;
    }
    if let Some(group) = surface.grid_y.as_mut() {
        group.visible = config.axis.y.options.gridlines;
    }
}

/// Rotation applied to tick labels when `tickLabels.rotated` is set.
#[must_use]
pub fn tick_label_rotation(group: &AxisGroup) -> f64 {
    if group.tick_labels_rotated {
        TICK_LABEL_ROTATION_DEG
    } else {
        0.0
    }
}
