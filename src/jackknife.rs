//! Jackknife (leave-one-out) resampling.

use crate::error::{Result, check_len};
use crate::stats::{mean, population_variance};
use crate::types::EstimationResult;

/// Bias-corrected jackknife estimate of the mean.
///
/// Leave-one-out means are computed from the total sum in a single pass.
pub fn jackknife_estimate(sample: &[f64]) -> Result<EstimationResult> {
    check_len(sample, 2)?;

    let n_vals = sample.len();
    let sum: f64 = sample.iter().sum();
    let jack_vec: Vec<_> = sample
        .iter()
        .map(|&val| (sum - val) / (n_vals - 1) as f64)
        .collect();

    correct_bias(sum / n_vals as f64, &jack_vec)
}

/// Bias-corrected jackknife estimate of an arbitrary `statistic` of the sample.
pub fn jackknife_with<F>(sample: &[f64], statistic: F) -> Result<EstimationResult>
where
    F: Fn(&[f64]) -> f64,
{
    check_len(sample, 2)?;

    let mut reduced = Vec::with_capacity(sample.len() - 1);
    let jack_vec: Vec<_> = (0..sample.len())
        .map(|i_val| {
            reduced.clear();
            reduced.extend_from_slice(&sample[..i_val]);
            reduced.extend_from_slice(&sample[i_val + 1..]);
            statistic(reduced.as_slice())
        })
        .collect();

    correct_bias(statistic(sample), &jack_vec)
}

fn correct_bias(full_stat: f64, jack_vec: &[f64]) -> Result<EstimationResult> {
    let n_vals = jack_vec.len() as f64;
    let jack_mean = mean(jack_vec)?;
    Ok(EstimationResult::new(
        full_stat - (n_vals - 1.0) * (jack_mean - full_stat),
        (n_vals - 1.0) * population_variance(jack_vec)?,
    ))
}
