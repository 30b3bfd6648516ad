//! Plot geometry shared by the chart handles. Pure math, kept separate from
//! the canvas code so it tests natively.

/// Milliseconds one bar's entrance animation runs.
pub const BAR_ANIMATION_MS: f64 = 2500.0;

/// Per-bar stagger applied before a bar's entrance animation starts.
pub const BAR_STAGGER_MS: f64 = 300.0;

/// Delay between the highlight pulse and its downplay.
pub const PULSE_DOWNPLAY_MS: u32 = 1_500;

/// Chart margins in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 24.0,
            right: 16.0,
            bottom: 36.0,
            left: 52.0,
        }
    }
}

/// Maps a data domain onto a pixel range. Ranges may be inverted (canvas y
/// grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Evenly spaced tick values across `[min, max]`, endpoints included.
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![min];
    }
    (0..count)
        .map(|i| min + (max - min) * i as f64 / (count - 1) as f64)
        .collect()
}

/// Band layout for `n` bars across `width` pixels: center x and bar width.
pub fn bar_slots(n: usize, width: f64) -> Vec<(f64, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let band = width / n as f64;
    let bar_width = (band * 0.6).max(1.0);
    (0..n)
        .map(|i| (band * (i as f64 + 0.5), bar_width))
        .collect()
}

/// Min/max of a value stream, with a safe span when empty or degenerate.
pub fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

/// Stagger offset before bar `index` starts animating.
pub fn stagger_delay(index: usize) -> f64 {
    index as f64 * BAR_STAGGER_MS
}

/// Elastic-out easing: overshoots, then settles. Input outside [0, 1] is
/// clamped to the endpoints.
pub fn elastic_out(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let period = 0.3;
    let s = period / 4.0;
    2f64.powf(-10.0 * t) * ((t - s) * std::f64::consts::TAU / period).sin() + 1.0
}

/// Animation progress of bar `index` at `elapsed` ms since the chart
/// appeared. Zero until the bar's stagger delay has passed, one once its
/// entrance animation completes.
pub fn bar_progress(elapsed: f64, index: usize) -> f64 {
    let local = elapsed - stagger_delay(index);
    if local <= 0.0 {
        0.0
    } else if local >= BAR_ANIMATION_MS {
        1.0
    } else {
        elastic_out(local / BAR_ANIMATION_MS)
    }
}

/// Axis tick label: whole numbers for large magnitudes, four decimals for
/// the sub-unit return values the line chart plots.
pub fn tick_label(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let text = if value.abs() >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.4}")
    };
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Split a gappy series into contiguous `(start_index, values)` polyline
/// runs; `None` entries become gaps between runs.
pub fn segments(points: &[Option<f64>]) -> Vec<(usize, Vec<f64>)> {
    let mut runs: Vec<(usize, Vec<f64>)> = Vec::new();
    let mut start = 0usize;
    let mut run: Vec<f64> = Vec::new();
    for (i, point) in points.iter().enumerate() {
        match point {
            Some(v) => {
                if run.is_empty() {
                    start = i;
                }
                run.push(*v);
            }
            None => {
                if !run.is_empty() {
                    runs.push((start, std::mem::take(&mut run)));
                }
            }
        }
    }
    if !run.is_empty() {
        runs.push((start, run));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scale_maps_endpoints_and_midpoint() {
        let scale = LinearScale::new((0.0, 1.0), (200.0, 0.0));
        assert_relative_eq!(scale.map(0.0), 200.0);
        assert_relative_eq!(scale.map(1.0), 0.0);
        assert_relative_eq!(scale.map(0.5), 100.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let scale = LinearScale::new((2.0, 2.0), (0.0, 100.0));
        assert_relative_eq!(scale.map(2.0), 0.0);
    }

    #[test]
    fn ticks_include_endpoints() {
        let t = ticks(0.0, 1.0, 6);
        assert_eq!(t.len(), 6);
        assert_relative_eq!(t[0], 0.0);
        assert_relative_eq!(t[5], 1.0);
        assert_relative_eq!(t[1], 0.2);
    }

    #[test]
    fn bar_slots_center_within_bands() {
        let slots = bar_slots(4, 400.0);
        assert_eq!(slots.len(), 4);
        assert_relative_eq!(slots[0].0, 50.0);
        assert_relative_eq!(slots[3].0, 350.0);
        assert_relative_eq!(slots[0].1, 60.0);
        assert!(bar_slots(0, 400.0).is_empty());
    }

    #[test]
    fn extent_handles_empty_and_flat_input() {
        assert_eq!(extent(std::iter::empty()), (0.0, 1.0));
        assert_eq!(extent([3.0, 3.0].into_iter()), (2.5, 3.5));
        assert_eq!(extent([-1.0, 2.0, 0.5].into_iter()), (-1.0, 2.0));
    }

    #[test]
    fn elastic_out_is_clamped_and_settles() {
        assert_relative_eq!(elastic_out(0.0), 0.0);
        assert_relative_eq!(elastic_out(1.0), 1.0);
        assert_relative_eq!(elastic_out(2.0), 1.0);
        // Overshoot is the point of the easing.
        assert!((0.0..=1.5).contains(&elastic_out(0.2)));
    }

    #[test]
    fn bar_progress_respects_stagger() {
        assert_relative_eq!(bar_progress(0.0, 1), 0.0);
        assert_relative_eq!(bar_progress(250.0, 1), 0.0);
        assert_relative_eq!(bar_progress(BAR_STAGGER_MS + BAR_ANIMATION_MS, 1), 1.0);
        assert_relative_eq!(bar_progress(BAR_ANIMATION_MS, 0), 1.0);
    }

    #[test]
    fn tick_labels_by_magnitude() {
        assert_eq!(tick_label(0.0), "0");
        assert_eq!(tick_label(12.0), "12");
        assert_eq!(tick_label(-40.0), "-40");
        assert_eq!(tick_label(1.0), "1");
        assert_eq!(tick_label(0.2), "0.2");
        assert_eq!(tick_label(0.0015), "0.0015");
    }

    #[test]
    fn segments_split_on_gaps() {
        let points = [None, None, Some(1.0), Some(2.0), None, Some(3.0)];
        let runs = segments(&points);
        assert_eq!(runs, vec![(2, vec![1.0, 2.0]), (5, vec![3.0])]);
        assert!(segments(&[None, None]).is_empty());
        assert_eq!(segments(&[Some(1.0)]), vec![(0, vec![1.0])]);
    }
}
