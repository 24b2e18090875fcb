//! Descriptive statistics shared by every analytics component.
//!
//! All helpers are total: an empty sample yields `0.0` rather than NaN,
//! so callers never need to special-case "not enough history yet".
//! Variance is the population variance (divides by `n`), matching the
//! per-session spread used by the risk comparator.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance: `mean((x - mean)^2)`.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Median of an unsorted sample. Even-length samples average the two
/// middle values. Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Probability-weighted expectation over `(probability, value)` pairs.
///
/// Probabilities are not required to sum to one; the caller decides
/// whether the outcome table is exhaustive.
pub fn expected_value(outcomes: &[(f64, f64)]) -> f64 {
    outcomes.iter().map(|(p, v)| p * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(expected_value(&[]), 0.0);
    }

    #[test]
    fn test_mean_and_population_variance() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&xs) - 5.0).abs() < 1e-12);
        assert!((variance(&xs) - 4.0).abs() < 1e-12);
        assert!((std_dev(&xs) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[-7.0]), -7.0);
    }

    #[test]
    fn test_expected_value() {
        // Fair coin paying 2 on heads, 0 on tails
        let ev = expected_value(&[(0.5, 2.0), (0.5, 0.0)]);
        assert!((ev - 1.0).abs() < 1e-12);
    }
}
