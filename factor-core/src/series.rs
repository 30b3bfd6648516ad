/// Window length for the smoothed line-chart series. Configuration, not
/// business logic.
pub const MA_WINDOW: usize = 5;

/// Trailing simple moving average.
///
/// `out[i]` is `None` until a full window of *prior* points exists; the
/// current point is excluded from its own window. The first `window`
/// entries are therefore undefined and rendered as gaps.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if window == 0 || i < window {
                None
            } else {
                Some(values[i - window..i].iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn window_five_over_six_points() {
        let out = trailing_mean(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5);
        assert_eq!(out.len(), 6);
        assert!(out[..5].iter().all(Option::is_none));
        assert_relative_eq!(out[5].unwrap(), 3.0);
    }

    #[test]
    fn shorter_input_than_window_is_all_gaps() {
        let out = trailing_mean(&[1.0, 2.0, 3.0], 5);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn window_slides_over_prior_points_only() {
        let out = trailing_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_relative_eq!(out[2].unwrap(), 1.5);
        assert_relative_eq!(out[3].unwrap(), 2.5);
    }

    #[test]
    fn zero_window_yields_no_defined_points() {
        let out = trailing_mean(&[1.0, 2.0], 0);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(trailing_mean(&[], 5).is_empty());
    }
}
