//! The caller-owned drawing surface.
//!
//! A `Surface` is created once by the host and passed into every
//! [`crate::BarChart::render`] call; the chart never locates it through
//! any ambient/global lookup. Between renders the host pumps
//! [`Surface::advance`] from its animation loop to move scheduled
//! transitions forward.

use indexmap::IndexMap;

use crate::anim::{AttrPath, AxisKind, BarAttr, TickAttr, TimeMs, TweenScheduler};
use crate::config::Margin;
use crate::error::{ChartError, ChartResult};
use crate::scene::nodes::{AxisGroup, BarNode, GridGroup, LabelNode, PlotArea};

#[derive(Debug)]
pub struct Surface {
    total_width: f64,
    total_height: f64,
    plot: Option<PlotArea>,
    pub(crate) x_axis: Option<AxisGroup>,
    pub(crate) y_axis: Option<AxisGroup>,
    pub(crate) grid_x: Option<GridGroup>,
    pub(crate) grid_y: Option<GridGroup>,
    pub(crate) label_x: Option<LabelNode>,
    pub(crate) label_y: Option<LabelNode>,
    pub(crate) title: Option<LabelNode>,
    pub(crate) bars: IndexMap<String, BarNode>,
    pub(crate) scheduler: TweenScheduler,
}

impl Surface {
    pub fn new(total_width: f64, total_height: f64) -> ChartResult<Self> {
        if !total_width.is_finite()
            || !total_height.is_finite()
            || total_width <= 0.0
            || total_height <= 0.0
        {
            return Err(ChartError::InvalidSurface {
                width: total_width,
                height: total_height,
            });
        }
        Ok(Self {
            total_width,
            total_height,
            plot: None,
            x_axis: None,
            y_axis: None,
            grid_x: None,
            grid_y: None,
            label_x: None,
            label_y: None,
            title: None,
            bars: IndexMap::new(),
            scheduler: TweenScheduler::default(),
        })
    }

    /// Creates the plot area inside the margins on first use; later calls
    /// return the existing one untouched.
    pub(crate) fn ensure_plot(&mut self, margin: &Margin) -> ChartResult<PlotArea> {
        if let Some(plot) = self.plot {
            return Ok(plot);
        }
        let width = self.total_width - margin.left - margin.right;
        let height = self.total_height - margin.top - margin.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidSurface { width, height });
        }
        let plot = PlotArea {
            origin_x: margin.left,
            origin_y: margin.top,
            width,
            height,
        };
        self.plot = Some(plot);
        Ok(plot)
    }

    /// Moves every in-flight transition forward to `now_ms` and sweeps
    /// bars whose exit transitions completed.
    pub fn advance(&mut self, now_ms: TimeMs) {
        let updates = self.scheduler.advance(now_ms);
        for (path, value) in updates {
            self.apply(&path, value);
        }
        let scheduler = &self.scheduler;
        self.bars
            .retain(|key, bar| !(bar.exiting && !scheduler.has_bar_tweens(key)));
    }

    fn apply(&mut self, path: &AttrPath, value: f64) {
        match path {
            AttrPath::Bar { key, attr } => {
                if let Some(bar) = self.bars.get_mut(key) {
                    match attr {
                        BarAttr::X => bar.x = value,
                        BarAttr::Y => bar.y = value,
                        BarAttr::Width => bar.width = value,
                        BarAttr::Height => bar.height = value,
                        BarAttr::Opacity => bar.opacity = value,
                    }
                }
            }
            AttrPath::Tick { axis, key, attr } => {
                let group = match axis {
                    AxisKind::X => self.x_axis.as_mut(),
                    AxisKind::Y => self.y_axis.as_mut(),
                };
                if let Some(tick) = group.and_then(|group| group.ticks.get_mut(key)) {
                    match attr {
                        TickAttr::Offset => tick.offset = value,
                        TickAttr::Opacity => tick.opacity = value,
                    }
                }
            }
            AttrPath::GridOpacity { axis } => {
                let group = match axis {
                    AxisKind::X => self.grid_x.as_mut(),
                    AxisKind::Y => self.grid_y.as_mut(),
                };
                if let Some(group) = group {
                    group.opacity = value;
                }
            }
        }
    }

    /// Current position of the animation clock.
    #[must_use]
    pub fn now(&self) -> TimeMs {
        self.scheduler.now()
    }

    /// Whether any transition is still in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.scheduler.is_idle()
    }

    // Stable hooks for external collaborators.

    #[must_use]
    pub fn plot(&self) -> Option<PlotArea> {
        self.plot
    }

    #[must_use]
    pub fn bars(&self) -> &IndexMap<String, BarNode> {
        &self.bars
    }

    #[must_use]
    pub fn bar(&self, key: &str) -> Option<&BarNode> {
        self.bars.get(key)
    }

    /// Bars bound to the current dataset, excluding ones still animating
    /// out.
    pub fn live_bars(&self) -> impl Iterator<Item = (&str, &BarNode)> {
        self.bars
            .iter()
            .filter(|(_, bar)| !bar.exiting)
            .map(|(key, bar)| (key.as_str(), bar))
    }

    #[must_use]
    pub fn x_axis(&self) -> Option<&AxisGroup> {
        self.x_axis.as_ref()
    }

    #[must_use]
    pub fn y_axis(&self) -> Option<&AxisGroup> {
        self.y_axis.as_ref()
    }

    #[must_use]
    pub fn grid_x(&self) -> Option<&GridGroup> {
        self.grid_x.as_ref()
    }

    #[must_use]
    pub fn grid_y(&self) -> Option<&GridGroup> {
        self.grid_y.as_ref()
    }

    #[must_use]
    pub fn label_x(&self) -> Option<&LabelNode> {
        self.label_x.as_ref()
    }

    #[must_use]
    pub fn label_y(&self) -> Option<&LabelNode> {
        self.label_y.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> Option<&LabelNode> {
        self.title.as_ref()
    }
}
