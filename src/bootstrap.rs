//! Bootstrap resampling.

use crate::error::{EstimatorError, Result, check_len};
use crate::stats::{mean, population_variance};
use crate::types::EstimationResult;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;

/// Bootstrap estimate of the mean.
///
/// Draws `n_resamples` samples of the same length with replacement and reports the
/// average and the population variance of their means.
pub fn bootstrap_estimate<R: Rng + ?Sized>(
    sample: &[f64],
    n_resamples: usize,
    rng: &mut R,
) -> Result<EstimationResult> {
    bootstrap_with(sample, n_resamples, rng, |resample| {
        resample.iter().sum::<f64>() / resample.len() as f64
    })
}

/// Bootstrap estimate of an arbitrary `statistic` of the sample.
pub fn bootstrap_with<R, F>(
    sample: &[f64],
    n_resamples: usize,
    rng: &mut R,
    statistic: F,
) -> Result<EstimationResult>
where
    R: Rng + ?Sized,
    F: Fn(&[f64]) -> f64,
{
    check_args(sample, n_resamples)?;

    let mut resample = vec![0.0; sample.len()];
    let stat_vec: Vec<_> = (0..n_resamples)
        .map(|_| {
            draw_resample(sample, &mut resample, rng);
            statistic(resample.as_slice())
        })
        .collect();

    summarize(&stat_vec)
}

/// Bootstrap estimate of the mean with the resamples spread over the rayon thread pool.
///
/// Resample `k` draws from its own [`ChaCha12Rng`] stream `k` of `seed`, so the result
/// only depends on the arguments and not on the number of threads.
pub fn bootstrap_estimate_par(
    sample: &[f64],
    n_resamples: usize,
    seed: u64,
) -> Result<EstimationResult> {
    check_args(sample, n_resamples)?;

    let mean_vec: Vec<_> = (0..n_resamples)
        .into_par_iter()
        .map_init(
            || vec![0.0; sample.len()],
            |resample, i_resample| {
                let mut rng = ChaCha12Rng::seed_from_u64(seed);
                rng.set_stream(i_resample as u64);
                draw_resample(sample, resample, &mut rng);
                resample.iter().sum::<f64>() / resample.len() as f64
            },
        )
        .collect();

    summarize(&mean_vec)
}

fn check_args(sample: &[f64], n_resamples: usize) -> Result<()> {
    if n_resamples < 1 {
        return Err(EstimatorError::InvalidParameter {
            name: "number of resamples",
            reason: "must be at least 1".to_string(),
        });
    }
    check_len(sample, 2)
}

fn draw_resample<R: Rng + ?Sized>(sample: &[f64], resample: &mut [f64], rng: &mut R) {
    for val in resample.iter_mut() {
        *val = sample[rng.random_range(0..sample.len())];
    }
}

fn summarize(stat_vec: &[f64]) -> Result<EstimationResult> {
    Ok(EstimationResult::new(
        mean(stat_vec)?,
        population_variance(stat_vec)?,
    ))
}
