//! Basic sample statistics and autocorrelation.

use crate::error::{EstimatorError, Result, check_len};
use crate::types::{AutocorrelationProfile, EstimationResult};
use rayon::prelude::*;

/// Arithmetic mean of the sample.
pub fn mean(sample: &[f64]) -> Result<f64> {
    check_len(sample, 1)?;
    Ok(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Unbiased sample variance, dividing by `n - 1`.
pub fn sample_variance(sample: &[f64]) -> Result<f64> {
    check_len(sample, 2)?;
    Ok(diff_2_sum(sample)? / (sample.len() - 1) as f64)
}

/// Population variance, dividing by `n`.
pub fn population_variance(sample: &[f64]) -> Result<f64> {
    check_len(sample, 1)?;
    Ok(diff_2_sum(sample)? / sample.len() as f64)
}

fn diff_2_sum(sample: &[f64]) -> Result<f64> {
    let mean = mean(sample)?;
    Ok(sample.iter().map(|&val| (val - mean).powi(2)).sum())
}

/// Uncorrelated estimate of the mean and its variance `sample_variance / n`.
///
/// Underestimates the error whenever the sample is autocorrelated.
pub fn naive_estimate(sample: &[f64]) -> Result<EstimationResult> {
    let mean = mean(sample)?;
    let var = sample_variance(sample)?;
    Ok(EstimationResult::new(mean, var / sample.len() as f64))
}

/// Covariance of two samples of equal length, dividing by `n`.
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(EstimatorError::InvalidParameter {
            name: "sample length",
            reason: format!("samples have lengths {} and {}", x.len(), y.len()),
        });
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(&val_x, &val_y)| (val_x - mean_x) * (val_y - mean_y))
        .sum();
    Ok(sum / x.len() as f64)
}

/// Autocovariance at lag `lag`, dividing by `n` for every lag.
pub fn autocovariance(sample: &[f64], lag: usize) -> Result<f64> {
    let mean = mean(sample)?;
    check_lag(sample, lag)?;
    Ok(lagged_sum(sample, lag, mean) / sample.len() as f64)
}

/// Autocorrelation coefficients for every lag `0..n`.
///
/// # Errors
/// Returns [`EstimatorError::DegenerateSample`] if the sample is (numerically) constant.
pub fn autocorrelation_profile(sample: &[f64]) -> Result<AutocorrelationProfile> {
    let n_vals = sample.len();
    let mean = mean(sample)?;
    let var = population_variance(sample)?;

    // The rounding error of the mean grows with the number of values summed.
    let scale = sample.iter().fold(0.0_f64, |acc, &val| acc.max(val.abs()));
    let tol = (n_vals as f64).max(4.0) * f64::EPSILON * scale;
    if sample.iter().all(|&val| val == sample[0]) || var <= tol.powi(2) {
        return Err(EstimatorError::DegenerateSample);
    }

    let norm = n_vals as f64 * var;
    let coefs: Vec<_> = (0..n_vals)
        .into_par_iter()
        .map(|lag| lagged_sum(sample, lag, mean) / norm)
        .collect();
    log::trace!("computed {} autocorrelation coefficients", coefs.len());

    Ok(AutocorrelationProfile::new(coefs))
}

fn check_lag(sample: &[f64], lag: usize) -> Result<()> {
    if lag >= sample.len() {
        return Err(EstimatorError::InvalidLag {
            lag,
            len: sample.len(),
        });
    }
    Ok(())
}

fn lagged_sum(sample: &[f64], lag: usize, mean: f64) -> f64 {
    sample[lag..]
        .iter()
        .zip(sample)
        .map(|(&val_lag, &val)| (val_lag - mean) * (val - mean))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rand_distr::{Distribution, StandardNormal};

    const ONE_TO_TEN: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

    fn normal_sample(n_vals: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        (0..n_vals).map(|_| StandardNormal.sample(&mut rng)).collect()
    }

    #[test]
    fn mean_and_variance_of_known_sample() {
        assert_relative_eq!(mean(&ONE_TO_TEN).unwrap(), 5.5);
        assert_relative_eq!(sample_variance(&ONE_TO_TEN).unwrap(), 55.0 / 6.0);
        assert_relative_eq!(population_variance(&ONE_TO_TEN).unwrap(), 8.25);

        let naive = naive_estimate(&ONE_TO_TEN).unwrap();
        assert_relative_eq!(naive.mean, 5.5);
        assert_relative_eq!(naive.variance, 55.0 / 60.0);
    }

    #[test]
    fn constant_sample_has_zero_variance() {
        let sample = [0.1; 7];
        assert_relative_eq!(mean(&sample).unwrap(), 0.1);
        assert_abs_diff_eq!(sample_variance(&sample).unwrap(), 0.0, epsilon = 1e-30);
        assert_eq!(
            autocorrelation_profile(&sample),
            Err(EstimatorError::DegenerateSample)
        );

        for sample in [vec![0.1; 1000], vec![0.1; 10_000], vec![123.456; 5000]] {
            assert_eq!(
                autocorrelation_profile(&sample),
                Err(EstimatorError::DegenerateSample)
            );
        }

        // A tiny but genuine spread is still accepted.
        let mut sample = vec![0.1; 10_000];
        sample[0] = 0.1 + 1e-6;
        let profile = autocorrelation_profile(&sample).unwrap();
        assert_relative_eq!(profile.coefs()[0], 1.0, epsilon = 1e-9);
        assert_eq!(profile.get(0), Some(profile.coefs()[0]));
        assert_eq!(profile.get(10_000), None);
    }

    #[test]
    fn short_samples_are_rejected() {
        assert_eq!(mean(&[]), Err(EstimatorError::EmptyInput));
        assert_eq!(
            sample_variance(&[3.0]),
            Err(EstimatorError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert_relative_eq!(population_variance(&[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn covariance_of_linear_relation() {
        let y: Vec<_> = ONE_TO_TEN.iter().map(|&x| 4.0 + 3.0 * x).collect();
        assert_relative_eq!(covariance(&ONE_TO_TEN, &y).unwrap(), 3.0 * 8.25);
        assert_relative_eq!(
            covariance(&ONE_TO_TEN, &ONE_TO_TEN).unwrap(),
            population_variance(&ONE_TO_TEN).unwrap()
        );
        assert!(matches!(
            covariance(&ONE_TO_TEN, &y[1..]),
            Err(EstimatorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn autocovariance_lag_bounds() {
        assert_relative_eq!(
            autocovariance(&ONE_TO_TEN, 0).unwrap(),
            population_variance(&ONE_TO_TEN).unwrap()
        );
        // (5.5 - 1) * (5.5 - 10) / 10
        assert_relative_eq!(autocovariance(&ONE_TO_TEN, 9).unwrap(), -2.025);
        assert_eq!(
            autocovariance(&ONE_TO_TEN, 10),
            Err(EstimatorError::InvalidLag { lag: 10, len: 10 })
        );
    }

    #[test]
    fn autocorrelation_starts_at_one() {
        let sample = normal_sample(1000, 7);
        let profile = autocorrelation_profile(&sample).unwrap();
        assert_eq!(profile.len(), 1000);
        assert_relative_eq!(profile.coefs()[0], 1.0, epsilon = 1e-12);

        // Uncorrelated draws: 4 standard errors of a coefficient.
        let bound = 4.0 / (1000.0_f64).sqrt();
        for lag in 1..10 {
            assert!(profile.coefs()[lag].abs() < bound);
        }
    }

    #[test]
    fn autocorrelation_matches_autocovariance() {
        let sample = normal_sample(50, 3);
        let profile = autocorrelation_profile(&sample).unwrap();
        let var = population_variance(&sample).unwrap();
        for lag in [1, 5, 49] {
            assert_relative_eq!(
                profile.coefs()[lag],
                autocovariance(&sample, lag).unwrap() / var,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn autocorrelation_time_of_ar1_series() {
        let phi = 0.8;
        let noise = normal_sample(8000, 11);
        let mut sample = Vec::with_capacity(noise.len());
        let mut val = 0.0;
        for eps in noise {
            val = phi * val + eps;
            sample.push(val);
        }
        let tau = autocorrelation_profile(&sample)
            .unwrap()
            .autocorrelation_time();
        assert_relative_eq!(tau, (1.0 + phi) / (1.0 - phi), max_relative = 0.3);
    }
}
