mod nodes;
mod surface;

pub use nodes::{AxisGroup, BarNode, Color, GridGroup, LabelNode, PlotArea, TickNode};
pub use surface::Surface;
