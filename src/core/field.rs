//! Field-path resolution and value coercion for record maps.
//!
//! Records are plain JSON objects; the axis `mapTo` paths address fields
//! lodash-`get` style (`"a.b.c"` descends nested objects). The y field is
//! coerced to a number and, on time axes, the x field is parsed with the
//! configured chrono pattern. Any record that fails to map aborts the
//! render before the scene is touched.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use serde_json::Value;

use crate::config::{ChartConfig, ScaleType};
use crate::error::{ChartError, ChartResult};

/// Resolves a dotted field path against a record.
#[must_use]
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Coerces a JSON value to a number the way the upstream unary `+` did:
/// numbers pass through, numeric strings parse, everything else fails.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Stringified identity/label form of an x value.
#[must_use]
pub fn x_key(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Parses a date string with a chrono pattern, accepting date-only
/// patterns by pinning the time of day to midnight.
#[must_use]
pub fn parse_date(value: &Value, format: &str) -> Option<NaiveDateTime> {
    let text = value.as_str()?;
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// One dataset record after the mapping pre-pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    /// Reconciliation identity and band-domain value: the x field as text.
    pub key: String,
    /// Parsed x value in unix seconds, present on time axes only.
    pub x_time: Option<f64>,
    /// Coerced y value.
    pub y: f64,
}

/// Maps and validates every record before any scene mutation.
///
/// Fails with [`ChartError::DataMapping`] naming the offending field and
/// record index, instead of letting NaN geometry propagate.
pub fn map_dataset(config: &ChartConfig, dataset: &[Value]) -> ChartResult<Vec<MappedRecord>> {
    let x_spec = &config.axis.x;
    let y_spec = &config.axis.y;
    let x_type = x_spec.scale.resolve("x")?;

    let mut records = Vec::with_capacity(dataset.len());
    for (index, record) in dataset.iter().enumerate() {
        let x_value = resolve(record, &x_spec.map_to).ok_or_else(|| ChartError::DataMapping {
            field: x_spec.map_to.clone(),
            index,
        })?;

        let x_time = if x_type == ScaleType::Time {
            let format = x_spec.scale.format.as_deref().unwrap_or_default();
            let parsed = parse_date(x_value, format).ok_or_else(|| ChartError::DataMapping {
                field: x_spec.map_to.clone(),
                index,
            })?;
            Some(parsed.and_utc().timestamp() as f64)
        } else {
            None
        };

        let y_value = resolve(record, &y_spec.map_to).ok_or_else(|| ChartError::DataMapping {
            field: y_spec.map_to.clone(),
            index,
        })?;
        let y = coerce_number(y_value)
            .filter(|y| y.is_finite())
            .ok_or_else(|| ChartError::DataMapping {
                field: y_spec.map_to.clone(),
                index,
            })?;
        if y < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "negative value {y} for `{}` on record {index}",
                y_spec.map_to
            )));
        }

        records.push(MappedRecord {
            key: x_key(x_value),
            x_time,
            y,
        });
    }

    // Keyed reconciliation cannot represent two live bars with one key.
    let mut seen: IndexSet<&str> = IndexSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.key.as_str()) {
            return Err(ChartError::InvalidData(format!(
                "duplicate x value `{}` in dataset",
                record.key
            )));
        }
    }

    Ok(records)
}
