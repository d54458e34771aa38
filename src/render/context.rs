//! Per-call render context.

use crate::config::ChartConfig;
use crate::core::{LinearScale, XScale};
use crate::scene::PlotArea;

/// Everything one render pass needs, recomputed on every call and passed
/// into the stateless rendering functions: plot dimensions plus the fresh
/// scales. Chart-kind variation lives in the [`crate::render::BarGeometry`]
/// strategy, not here.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub config: &'a ChartConfig,
    pub plot: PlotArea,
    pub x_scale: XScale,
    pub y_scale: LinearScale,
    /// Record count of the current dataset; sizes bars on continuous x
    /// axes, where there is no bandwidth.
    pub slot_count: usize,
}
