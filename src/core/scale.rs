//! Scale construction from config + dataset.
//!
//! Scales are rebuilt on every render call from the current dataset only;
//! nothing accumulates across calls.

use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::config::{AxisSpec, ScaleType};
use crate::core::field::MappedRecord;
use crate::error::{ChartError, ChartResult};

const DEFAULT_BAND_PADDING: f64 = 0.05;

/// Discrete scale mapping categorical values to evenly spaced, padded
/// intervals within `[0, width]`.
///
/// Domain order is first-seen order. Geometry follows the d3 `scaleBand`
/// math with equal inner/outer padding and centered alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    width: f64,
    padding: f64,
}

impl BandScale {
    pub fn new(domain: IndexSet<String>, width: f64, padding: f64) -> ChartResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "band scale width must be finite and > 0, got {width}"
            )));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(format!(
                "band scale padding must be in [0, 1), got {padding}"
            )));
        }
        Ok(Self {
            domain,
            width,
            padding,
        })
    }

    /// Distance between consecutive band starts.
    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.domain.len().max(1) as f64;
        self.width / (n + self.padding)
    }

    /// Width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Left edge of the band for a domain value, `None` when the value is
    /// not part of the domain.
    #[must_use]
    pub fn position(&self, value: &str) -> Option<f64> {
        let index = self.domain.get_index_of(value)?;
        let step = self.step();
        Some(self.padding * step + index as f64 * step)
    }

    #[must_use]
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (0.0, self.width)
    }
}

/// Continuous scale mapping unix-second timestamps to `[0, width]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: f64,
    end: f64,
    width: f64,
}

impl TimeScale {
    pub fn new(start: f64, end: f64, width: f64) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(ChartError::InvalidData(format!(
                "time scale domain must be finite and ordered, got [{start}, {end}]"
            )));
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "time scale width must be finite and > 0, got {width}"
            )));
        }
        // A single-instant domain still needs a drawable span.
        let end = if end > start { end } else { start + 1.0 };
        Ok(Self { start, end, width })
    }

    #[must_use]
    pub fn position(&self, time: f64) -> f64 {
        (time - self.start) / (self.end - self.start) * self.width
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (0.0, self.width)
    }
}

/// Linear y scale with domain `[0, max]` over the SVG-style inverted
/// range `[height, 0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    max: f64,
    height: f64,
}

impl LinearScale {
    pub fn new(max: f64, height: f64) -> ChartResult<Self> {
        if !max.is_finite() || max <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "linear scale upper bound must be finite and > 0, got {max}"
            )));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "linear scale height must be finite and > 0, got {height}"
            )));
        }
        Ok(Self { max, height })
    }

    #[must_use]
    pub fn position(&self, value: f64) -> f64 {
        self.height - (value / self.max) * self.height
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.max)
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.height, 0.0)
    }

    /// Builds the y scale over the current dataset only.
    ///
    /// An empty dataset or an all-zero one falls back to an upper bound of
    /// 1.0 so axis geometry stays finite while the bars reconcile away.
    pub fn from_records(records: &[MappedRecord], height: f64) -> ChartResult<Self> {
        let max = records
            .iter()
            .map(|record| OrderedFloat(record.y))
            .max()
            .map_or(0.0, OrderedFloat::into_inner);
        let max = if max > 0.0 { max } else { 1.0 };
        Self::new(max, height)
    }
}

/// The x scale variants supported by the chart family.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    Band(BandScale),
    Time(TimeScale),
}

impl XScale {
    /// Builds the x scale from the axis spec and the mapped dataset.
    pub fn build(spec: &AxisSpec, records: &[MappedRecord], width: f64) -> ChartResult<Self> {
        match spec.scale.resolve("x")? {
            ScaleType::Band => {
                let domain: IndexSet<String> =
                    records.iter().map(|record| record.key.clone()).collect();
                let padding = spec.options.padding.unwrap_or(DEFAULT_BAND_PADDING);
                Ok(Self::Band(BandScale::new(domain, width, padding)?))
            }
            ScaleType::Time => {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                for record in records {
                    let time = record.x_time.ok_or_else(|| {
                        ChartError::InvalidData("time axis record without parsed date".to_owned())
                    })?;
                    min = min.min(time);
                    max = max.max(time);
                }
                if records.is_empty() {
                    min = 0.0;
                    max = 1.0;
                }
                Ok(Self::Time(TimeScale::new(min, max, width)?))
            }
            ScaleType::Linear => Err(ChartError::UnknownScaleType {
                axis: "x",
                found: spec.scale.kind.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn domain(values: &[&str]) -> IndexSet<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn band_positions_follow_first_seen_order() {
        let scale = BandScale::new(domain(&["FR", "DE", "IT"]), 300.0, 0.0).expect("scale");

        assert_relative_eq!(scale.step(), 100.0);
        assert_relative_eq!(scale.bandwidth(), 100.0);
        assert_relative_eq!(scale.position("FR").expect("FR"), 0.0);
        assert_relative_eq!(scale.position("DE").expect("DE"), 100.0);
        assert_relative_eq!(scale.position("IT").expect("IT"), 200.0);
        assert!(scale.position("ES").is_none());
    }

    #[test]
    fn band_padding_shrinks_bands_and_offsets_start() {
        let scale = BandScale::new(domain(&["a", "b"]), 210.0, 0.1).expect("scale");

        // step = 210 / (2 + 0.1) = 100
        assert_relative_eq!(scale.step(), 100.0);
        assert_relative_eq!(scale.bandwidth(), 90.0);
        assert_relative_eq!(scale.position("a").expect("a"), 10.0);
        assert_relative_eq!(scale.position("b").expect("b"), 110.0);
    }

    #[test]
    fn linear_scale_inverts_range() {
        let scale = LinearScale::new(5.0, 400.0).expect("scale");

        assert_relative_eq!(scale.position(0.0), 400.0);
        assert_relative_eq!(scale.position(5.0), 0.0);
        assert_relative_eq!(scale.position(2.5), 200.0);
        assert_eq!(scale.domain(), (0.0, 5.0));
    }

    #[test]
    fn linear_scale_from_records_uses_current_max_only() {
        let records = vec![
            MappedRecord {
                key: "FR".to_owned(),
                x_time: None,
                y: 5.0,
            },
            MappedRecord {
                key: "DE".to_owned(),
                x_time: None,
                y: 3.0,
            },
        ];
        let scale = LinearScale::from_records(&records, 100.0).expect("scale");
        assert_eq!(scale.domain(), (0.0, 5.0));
    }

    #[test]
    fn degenerate_y_domain_falls_back() {
        let scale = LinearScale::from_records(&[], 100.0).expect("scale");
        assert_eq!(scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn time_scale_maps_extent_to_width() {
        let scale = TimeScale::new(1_000.0, 2_000.0, 500.0).expect("scale");

        assert_relative_eq!(scale.position(1_000.0), 0.0);
        assert_relative_eq!(scale.position(2_000.0), 500.0);
        assert_relative_eq!(scale.position(1_500.0), 250.0);
    }

    #[test]
    fn single_instant_time_domain_is_drawable() {
        let scale = TimeScale::new(1_000.0, 1_000.0, 500.0).expect("scale");
        assert_relative_eq!(scale.position(1_000.0), 0.0);
    }
}
