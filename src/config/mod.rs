//! Declarative chart configuration.
//!
//! The config document is consumed as-is from JSON (the shape used by the
//! upstream statistics dashboards) or built in Rust. Validation happens
//! once, up front, in [`ChartConfig::validate`]; render code can then read
//! the document without re-checking it.

mod palette;
mod variants;

pub use palette::{Palette, palette_lookup};
pub use variants::{ConfigVariant, bar_config};

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Scale family selected by an [`AxisSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    Band,
    Linear,
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for GraphSpec {
    fn default() -> Self {
        Self {
            kind: "bar".to_owned(),
        }
    }
}

/// Margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    fn validate(self) -> ChartResult<()> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Config(format!(
                    "margin.{side} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    /// Scale family name. Accepts both the short spellings (`band`,
    /// `linear`, `time`) and the upstream `scaleBand`/`scaleLinear`/
    /// `scaleTime` ones.
    #[serde(rename = "type")]
    pub kind: String,
    /// Date pattern for time scales (chrono `%`-syntax, e.g. `%d %b %Y`).
    #[serde(default)]
    pub format: Option<String>,
}

impl ScaleSpec {
    /// Resolves the scale family, failing fast on unrecognized names.
    pub fn resolve(&self, axis: &'static str) -> ChartResult<ScaleType> {
        match self.kind.as_str() {
            "band" | "scaleBand" => Ok(ScaleType::Band),
            "linear" | "scaleLinear" => Ok(ScaleType::Linear),
            "time" | "scaleTime" => Ok(ScaleType::Time),
            other => Err(ChartError::UnknownScaleType {
                axis,
                found: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelOptions {
    pub value: String,
    pub visible: bool,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            value: String::new(),
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineOptions {
    pub visible: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self { visible: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOptions {
    pub visible: bool,
    /// Requested tick count for time and linear axes; label stride for
    /// band axes (every Nth domain value keeps its tick).
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            visible: true,
            number: None,
            format: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickLabelOptions {
    pub visible: bool,
    pub rotated: bool,
}

impl Default for TickLabelOptions {
    fn default() -> Self {
        Self {
            visible: true,
            rotated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(default)]
    pub padding: Option<f64>,
    #[serde(default)]
    pub label: LabelOptions,
    #[serde(default)]
    pub line: LineOptions,
    #[serde(default)]
    pub ticks: TickOptions,
    #[serde(default)]
    pub tick_labels: TickLabelOptions,
    #[serde(default)]
    pub gridlines: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    /// Dotted field path resolved on every record, lodash-`get` style.
    pub map_to: String,
    pub scale: ScaleSpec,
    #[serde(default)]
    pub options: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPair {
    pub x: AxisSpec,
    pub y: AxisSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TitleSpec {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TooltipSpec {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LegendSpec {
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResizeSpec {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub break_point_x: f64,
    #[serde(default)]
    pub break_point_y: f64,
}

/// Root configuration document.
///
/// Serializable so host applications can persist/load chart setup without
/// inventing their own ad-hoc format. The tooltip, legend and resize
/// sections are carried for external collaborators; the render core only
/// reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default)]
    pub graph: GraphSpec,
    pub margin: Margin,
    pub axis: AxisPair,
    #[serde(default)]
    pub title: TitleSpec,
    #[serde(default = "default_color_scale")]
    pub color_scale: String,
    #[serde(default)]
    pub tooltip: TooltipSpec,
    #[serde(default)]
    pub legend: LegendSpec,
    #[serde(default)]
    pub resize: ResizeSpec,
}

fn default_color_scale() -> String {
    "schemeCategory10".to_owned()
}

impl ChartConfig {
    /// Parses and validates a JSON config document in one step.
    pub fn from_json(document: &str) -> ChartResult<Self> {
        let config: Self =
            serde_json::from_str(document).map_err(|err| ChartError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the whole document atomically.
    ///
    /// Called by [`crate::BarChart::new`] before any scene mutation, so a
    /// malformed config can never leave the surface half-updated.
    pub fn validate(&self) -> ChartResult<()> {
        self.margin.validate()?;

        let x_type = self.axis.x.scale.resolve("x")?;
        let y_type = self.axis.y.scale.resolve("y")?;

        if x_type == ScaleType::Linear {
            return Err(ChartError::Config(
                "axis.x.scale.type must be band or time".to_owned(),
            ));
        }
        if y_type != ScaleType::Linear {
            return Err(ChartError::Config(
                "axis.y.scale.type must be linear".to_owned(),
            ));
        }
        if x_type == ScaleType::Time
            && self
                .axis
                .x
                .scale
                .format
                .as_deref()
                .is_none_or(|format| format.is_empty())
        {
            return Err(ChartError::Config(
                "axis.x.scale.format is required for time scales".to_owned(),
            ));
        }

        for (axis, spec) in [("x", &self.axis.x), ("y", &self.axis.y)] {
            if spec.map_to.is_empty() {
                return Err(ChartError::Config(format!(
                    "axis.{axis}.mapTo must not be empty"
                )));
            }
            if let Some(padding) = spec.options.padding {
                if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
                    return Err(ChartError::Config(format!(
                        "axis.{axis}.options.padding must be in [0, 1), got {padding}"
                    )));
                }
            }
        }

        if palette_lookup(&self.color_scale).is_none() {
            return Err(ChartError::Config(format!(
                "unknown colorScale `{}`",
                self.color_scale
            )));
        }

        Ok(())
    }
}
