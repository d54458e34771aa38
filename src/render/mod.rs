mod axes;
mod bars;
mod chart;
mod context;
mod state;

pub use axes::tick_label_rotation;
pub use bars::{BarGeometry, Rect, ReconcilePlan, VerticalBars};
pub use chart::BarChart;
pub use context::RenderContext;
pub use state::RenderState;
