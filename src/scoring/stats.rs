//! Small statistics helpers shared by the probes and the grader.

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation, `0.0` for an empty slice.
pub fn population_std_dev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let avg = mean(samples);
    let variance = samples.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation of the samples.
///
/// Returns `1.0` (fully unstable) when the mean is not positive, so a set of
/// failed runs never reads as consistent.
pub fn coefficient_of_variation(samples: &[f64]) -> f64 {
    let avg = mean(samples);
    if avg > 0.0 {
        population_std_dev(samples) / avg
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(3.14), 3.1);
        assert_eq!(round1(3.16), 3.2);
        assert_eq!(round1(2.25), 2.3);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(10.0 / 3.0), 3.33);
        assert_eq!(round2(5.0), 5.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(mean(&[7.5]), 7.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std_dev__known_values() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(population_std_dev(&samples), 2.0);
    }

    #[test]
    fn test_population_std_dev__degenerate_inputs() {
        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(population_std_dev(&[42.0]), 0.0);
        assert_eq!(population_std_dev(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_coefficient_of_variation__identical_samples() {
        assert_eq!(coefficient_of_variation(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_coefficient_of_variation__zero_mean_is_unstable() {
        assert_eq!(coefficient_of_variation(&[]), 1.0);
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_coefficient_of_variation__spread_samples() {
        let cv = coefficient_of_variation(&[8.0, 10.0, 12.0]);
        assert!(cv > 0.16 && cv < 0.17);
    }
}
