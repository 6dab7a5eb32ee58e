//! Estimation result types.

use serde::{Deserialize, Serialize};

/// Point estimate of the mean with the variance of that estimate.
///
/// The variance is never negative, see [`EstimationResult::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Estimated mean.
    pub mean: f64,
    /// Estimated variance of the mean.
    pub variance: f64,
    /// Square root of `variance`.
    pub std_dev: f64,
}

impl EstimationResult {
    /// Create a result from a mean and a variance.
    ///
    /// Negative variances coming from floating-point cancellation are clamped to zero.
    pub fn new(mean: f64, variance: f64) -> Self {
        let variance = variance.max(0.0);
        Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

/// Autocorrelation coefficients of a sample.
///
/// Index `d` holds the lag-`d` coefficient, so the first one is always 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocorrelationProfile {
    coefs: Vec<f64>,
}

impl AutocorrelationProfile {
    pub(crate) fn new(coefs: Vec<f64>) -> Self {
        Self { coefs }
    }

    /// Get all coefficients, ordered by lag.
    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    /// Get the coefficient at lag `lag`, if the sample is long enough.
    pub fn get(&self, lag: usize) -> Option<f64> {
        self.coefs.get(lag).copied()
    }

    pub fn len(&self) -> usize {
        self.coefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefs.is_empty()
    }

    /// Integrated autocorrelation time `1 + 2 * sum(coefs[1..])`.
    ///
    /// The sum stops at the first non-positive coefficient, past which the
    /// estimated coefficients are dominated by noise.
    pub fn autocorrelation_time(&self) -> f64 {
        let sum: f64 = self
            .coefs
            .iter()
            .skip(1)
            .take_while(|&&coef| coef > 0.0)
            .sum();
        1.0 + 2.0 * sum
    }
}

/// Blocking result for a single block size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockingEntry {
    /// Number of consecutive values averaged into one block.
    pub block_size: usize,
    /// Number of blocks.
    pub n_blocks: usize,
    /// Mean of the block means.
    pub mean: f64,
    /// Variance of the mean estimated from the block means.
    pub variance: f64,
}

impl BlockingEntry {
    /// Error of the variance estimate, assuming uncorrelated block means.
    pub fn variance_err(&self) -> f64 {
        self.variance * (2.0 / (self.n_blocks as f64 - 1.0)).sqrt()
    }
}

/// Blocking results for every admissible block size, in increasing block size order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockingProfile {
    pub entries: Vec<BlockingEntry>,
}
