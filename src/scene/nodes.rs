//! Visual primitive nodes making up the drawing surface.
//!
//! Nodes carry the animatable attributes (positions, sizes, opacity) plus
//! the style flags the renderer reapplies on every call. They are plain
//! data: external collaborators (legend, tooltip, resize handlers) read
//! them through the surface's group accessors.

use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ChartError::InvalidData(format!("invalid hex color `{hex}`")));
        }
        let channel = |range: std::ops::Range<usize>| -> ChartResult<f64> {
            u8::from_str_radix(&digits[range], 16)
                .map(|byte| f64::from(byte) / 255.0)
                .map_err(|_| ChartError::InvalidData(format!("invalid hex color `{hex}`")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// The plot area inside the margins, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

/// One axis tick: a mark plus its label, positioned along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TickNode {
    /// Offset along the axis in plot coordinates.
    pub offset: f64,
    pub label: String,
    pub opacity: f64,
}

/// An axis group: its ticks keyed by domain value, plus the style flags
/// reapplied after every render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisGroup {
    pub ticks: IndexMap<String, TickNode>,
    pub line_visible: bool,
    pub ticks_visible: bool,
    pub tick_labels_visible: bool,
    pub tick_labels_rotated: bool,
}

/// Tick-aligned lines spanning the plot area, behind the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGroup {
    /// Offsets along the owning axis.
    pub offsets: Vec<f64>,
    /// Length of each line across the plot (full width or height).
    pub extent: f64,
    pub opacity: f64,
    /// Once created the group is never removed; toggling the config flag
    /// off hides it here and stops offset updates.
    pub visible: bool,
}

/// A standalone text node (axis labels, title). Position is fixed at
/// creation; later renders update only the text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub visible: bool,
}

/// One bar rect with its animatable geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BarNode {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub fill: Color,
    /// Set while the bar animates out; it is removed from the scene once
    /// its exit transition completes.
    pub exiting: bool,
}
