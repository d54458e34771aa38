//! The render orchestrator.

use serde_json::Value;
use tracing::debug;

use crate::config::{ChartConfig, palette_lookup};
use crate::core::{LinearScale, XScale, map_dataset};
use crate::error::{ChartError, ChartResult};
use crate::render::axes;
use crate::render::bars::{BarGeometry, VerticalBars, reconcile};
use crate::render::context::RenderContext;
use crate::render::state::RenderState;
use crate::scene::Surface;

/// Animated bar chart bound to one configuration.
///
/// `render` is safely re-invocable with a new dataset at any time and
/// always converges the surface to a scene consistent with the latest
/// dataset, via minimal mutation rather than full rebuild.
pub struct BarChart {
    config: ChartConfig,
    state: RenderState,
    geometry: Box<dyn BarGeometry>,
}

impl BarChart {
    /// Validates the config once, atomically, before anything can be
    /// drawn with it.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let geometry = geometry_for(&config.graph.kind)?;
        Ok(Self {
            config,
            state: RenderState::default(),
            geometry,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replaces the configuration between renders, e.g. to toggle a
    /// visual option. Validation failures leave the chart unchanged.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.geometry = geometry_for(&config.graph.kind)?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Renders the dataset onto the caller-owned surface.
    ///
    /// Sequences surface setup → data mapping → scale build →
    /// axis/decoration pass → bar reconciliation. All validation happens
    /// before the first scene mutation, so a failed call leaves the
    /// surface exactly as it was.
    pub fn render(&mut self, surface: &mut Surface, dataset: &[Value]) -> ChartResult<()> {
        let plot = surface.ensure_plot(&self.config.margin)?;

        let records = map_dataset(&self.config, dataset)?;
        let x_scale = XScale::build(&self.config.axis.x, &records, plot.width)?;
        let y_scale = LinearScale::from_records(&records, plot.height)?;
        let palette = palette_lookup(&self.config.color_scale).ok_or_else(|| {
            ChartError::Config(format!("unknown colorScale `{}`", self.config.color_scale))
        })?;

        let ctx = RenderContext {
            config: &self.config,
            plot,
            x_scale,
            y_scale,
            slot_count: records.len(),
        };

        axes::render_x_axis(&ctx, surface, &mut self.state);
        axes::render_y_axis(&ctx, surface, &mut self.state);
        axes::render_gridlines(&ctx, surface, &mut self.state);
        axes::render_labels(&ctx, surface, &mut self.state);
        axes::apply_style_overrides(&self.config, surface);

        reconcile(
            &ctx,
            surface,
            &mut self.state,
            &records,
            self.geometry.as_ref(),
            palette,
        )?;

        self.state.renders += 1;
        debug!(
            records = records.len(),
            renders = self.state.renders,
            "render pass complete"
        );
        Ok(())
    }
}

fn geometry_for(kind: &str) -> ChartResult<Box<dyn BarGeometry>> {
    match kind {
        "bar" | "groupedBar" => Ok(Box::new(VerticalBars)),
        other => Err(ChartError::Config(format!(
            "unsupported graph.type `{other}`"
        ))),
    }
}
