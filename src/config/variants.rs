//! Pre-built config bundles keyed by the dataset's x-value kind.
//!
//! The `Date` variant differs from `Default` only in the x-axis time
//! format string, mirroring the upstream bundle pairs.

use super::{
    AxisOptions, AxisPair, AxisSpec, ChartConfig, GraphSpec, LabelOptions, LegendSpec, LineOptions,
    Margin, ResizeSpec, ScaleSpec, TickLabelOptions, TickOptions, TitleSpec, TooltipSpec,
};

/// Discriminator selecting a pre-built option bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigVariant {
    Default,
    Date,
}

/// Builds the stock bar-chart configuration for a variant.
#[must_use]
pub fn bar_config(variant: ConfigVariant) -> ChartConfig {
    let x_format = match variant {
        ConfigVariant::Default => None,
        ConfigVariant::Date => Some("%d %b %Y".to_owned()),
    };

    ChartConfig {
        graph: GraphSpec {
            kind: "groupedBar".to_owned(),
        },
        margin: Margin {
            top: 50.0,
            right: 40.0,
            bottom: 70.0,
            left: 60.0,
        },
        axis: AxisPair {
            x: AxisSpec {
                map_to: "term".to_owned(),
                scale: ScaleSpec {
                    kind: "band".to_owned(),
                    format: x_format,
                },
                options: AxisOptions {
                    padding: Some(0.1),
                    label: LabelOptions {
                        value: "LabelX".to_owned(),
                        visible: false,
                    },
                    line: LineOptions { visible: false },
                    ticks: TickOptions {
                        visible: false,
                        number: None,
                        format: None,
                    },
                    tick_labels: TickLabelOptions {
                        visible: true,
                        rotated: false,
                    },
                    gridlines: false,
                },
            },
            y: AxisSpec {
                map_to: "count".to_owned(),
                scale: ScaleSpec {
                    kind: "linear".to_owned(),
                    format: None,
                },
                options: AxisOptions {
                    padding: None,
                    label: LabelOptions {
                        value: "LabelY".to_owned(),
                        visible: false,
                    },
                    line: LineOptions { visible: false },
                    ticks: TickOptions {
                        visible: false,
                        number: None,
                        format: None,
                    },
                    tick_labels: TickLabelOptions {
                        visible: true,
                        rotated: false,
                    },
                    gridlines: true,
                },
            },
        },
        title: TitleSpec {
            value: "Title".to_owned(),
            visible: false,
        },
        color_scale: "schemeCategory20".to_owned(),
        tooltip: TooltipSpec { enabled: true },
        legend: LegendSpec {
            visible: true,
            position: "side".to_owned(),
        },
        resize: ResizeSpec {
            enabled: true,
            break_point_x: 550.0,
            break_point_y: 275.0,
        },
    }
}
