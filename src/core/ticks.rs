//! Tick selection and label formatting for the axis renderer.

use chrono::DateTime;

const DEFAULT_TICK_COUNT: usize = 10;

// d3-style step thresholds: sqrt(50), sqrt(10), sqrt(2).
const E10: f64 = 7.071_067_811_865_476;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = 1.414_213_562_373_095_1;

/// Picks a 1/2/5 * 10^k step for roughly `count` ticks over `span`.
#[must_use]
pub fn tick_step(span: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let raw = span / count;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;

    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    base * factor
}

/// Tick values for a `[0, max]` linear domain at nice step multiples.
#[must_use]
pub fn linear_ticks(max: f64, count: Option<u32>) -> Vec<f64> {
    if !max.is_finite() || max <= 0.0 {
        return Vec::new();
    }
    let count = count.map_or(DEFAULT_TICK_COUNT, |n| n.max(1) as usize);
    let step = tick_step(max, count);

    let mut ticks = Vec::new();
    let mut index = 0u32;
    loop {
        let value = f64::from(index) * step;
        if value > max * (1.0 + 1e-9) {
            break;
        }
        ticks.push(value);
        index += 1;
    }
    ticks
}

/// Evenly spaced tick times across a `[start, end]` time domain,
/// endpoints included.
#[must_use]
pub fn time_ticks(start: f64, end: f64, count: Option<u32>) -> Vec<f64> {
    let count = count.map_or(DEFAULT_TICK_COUNT, |n| n.max(1) as usize);
    if end <= start {
        return vec![start];
    }
    let span = end - start;
    (0..=count)
        .map(|index| start + span * index as f64 / count as f64)
        .collect()
}

/// Index-modulo filter for band tick labels: every `stride`-th domain
/// value keeps its tick, the rest are skipped. A missing or degenerate
/// stride keeps everything, matching the upstream
/// `domain().filter((d, i) => !(i % number))` behavior.
#[must_use]
pub fn band_tick_kept(index: usize, stride: Option<u32>) -> bool {
    match stride {
        Some(stride) if stride > 1 => index % stride as usize == 0,
        _ => true,
    }
}

/// Formats a linear tick value.
///
/// `"d"` forces rounded integers; other patterns are not supported and
/// fall back to the default trimmed rendering.
#[must_use]
pub fn format_number(value: f64, format: Option<&str>) -> String {
    match format {
        Some("d") => format!("{}", value.round() as i64),
        Some(other) if !other.is_empty() => {
            tracing::warn!(format = other, "unsupported tick format, using default");
            format_trimmed(value)
        }
        _ => format_trimmed(value),
    }
}

fn format_trimmed(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

/// Formats a unix-seconds tick with a chrono pattern.
#[must_use]
pub fn format_time(time: f64, format: &str) -> String {
    DateTime::from_timestamp(time.round() as i64, 0)
        .map(|datetime| datetime.format(format).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn step_picks_one_two_five_multiples() {
        assert_relative_eq!(tick_step(10.0, 10), 1.0);
        assert_relative_eq!(tick_step(10.0, 5), 2.0);
        assert_relative_eq!(tick_step(100.0, 10), 10.0);
        assert_relative_eq!(tick_step(1.0, 4), 0.2);
    }

    #[test]
    fn linear_ticks_cover_zero_to_max() {
        let ticks = linear_ticks(5.0, Some(5));
        assert_eq!(ticks, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let ticks = linear_ticks(5.0, None);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert!(ticks.last().copied().expect("non-empty") <= 5.0);
    }

    #[test]
    fn band_stride_keeps_every_nth_label() {
        let kept: Vec<usize> = (0..7).filter(|i| band_tick_kept(*i, Some(3))).collect();
        assert_eq!(kept, vec![0, 3, 6]);

        // Degenerate strides keep everything.
        assert!((0..5).all(|i| band_tick_kept(i, None)));
        assert!((0..5).all(|i| band_tick_kept(i, Some(0))));
        assert!((0..5).all(|i| band_tick_kept(i, Some(1))));
    }

    #[test]
    fn time_ticks_include_endpoints() {
        let ticks = time_ticks(0.0, 100.0, Some(4));
        assert_eq!(ticks, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn number_formatting_trims_noise() {
        assert_eq!(format_number(3.0, None), "3");
        assert_eq!(format_number(2.5, None), "2.5");
        assert_eq!(format_number(2.4, Some("d")), "2");
    }

    #[test]
    fn time_formatting_uses_chrono_patterns() {
        // 2017-01-02 00:00:00 UTC
        assert_eq!(format_time(1_483_315_200.0, "%d %b %Y"), "02 Jan 2017");
    }
}
