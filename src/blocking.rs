//! Blocking method for the error of the mean of correlated samples.
//!
//! The sample is split into contiguous blocks and the block means are treated as
//! independent measurements. Once blocks are longer than the correlation time, the
//! variance of the mean estimated from them stops growing with the block size and
//! reaches a plateau. A [`PlateauRule`] turns the resulting [`BlockingProfile`] into
//! a single estimate.

use crate::error::{EstimatorError, Result, check_len};
use crate::stats::{mean, sample_variance};
use crate::types::{BlockingEntry, BlockingProfile, EstimationResult};
use rayon::prelude::*;

/// Number of trailing profile entries averaged by default.
pub const DEFAULT_WINDOW: usize = 200;

/// Rule to read the plateau value of a blocking profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateauRule {
    /// Average mean and variance over the last `window` entries (or all of them, if fewer).
    TrailingWindow { window: usize },
    /// Take the first entry whose variance is not significantly below that of any
    /// larger block size, using the error of each variance estimate.
    ErrorBound,
}

impl Default for PlateauRule {
    fn default() -> Self {
        Self::TrailingWindow {
            window: DEFAULT_WINDOW,
        }
    }
}

/// Compute the blocking profile for block sizes `1..=max_block_size`.
///
/// Block sizes that do not divide the sample length are skipped, and so are block
/// sizes leaving fewer than two blocks.
pub fn blocking_profile(sample: &[f64], max_block_size: usize) -> Result<BlockingProfile> {
    if max_block_size == 0 {
        return Err(EstimatorError::InvalidParameter {
            name: "maximum block size",
            reason: "must be at least 1".to_string(),
        });
    }
    check_len(sample, 2)?;

    let n_vals = sample.len();
    let max_block_size = max_block_size.min(n_vals / 2);
    let entries = (1..=max_block_size)
        .into_par_iter()
        .filter(|block_size| n_vals % block_size == 0)
        .map(|block_size| compute_entry(sample, block_size))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("blocking profile has {} entries", entries.len());

    Ok(BlockingProfile { entries })
}

fn compute_entry(sample: &[f64], block_size: usize) -> Result<BlockingEntry> {
    let blk_means = sample
        .chunks_exact(block_size)
        .map(mean)
        .collect::<Result<Vec<_>>>()?;
    let n_blocks = blk_means.len();
    Ok(BlockingEntry {
        block_size,
        n_blocks,
        mean: mean(&blk_means)?,
        variance: sample_variance(&blk_means)? / n_blocks as f64,
    })
}

/// Blocking estimate with the default [`PlateauRule`].
pub fn blocking_estimate(sample: &[f64], max_block_size: usize) -> Result<EstimationResult> {
    blocking_estimate_with(sample, max_block_size, PlateauRule::default())
}

/// Blocking estimate reading the plateau with `rule`.
pub fn blocking_estimate_with(
    sample: &[f64],
    max_block_size: usize,
    rule: PlateauRule,
) -> Result<EstimationResult> {
    let profile = blocking_profile(sample, max_block_size)?;
    read_plateau(&profile, rule)
}

/// Reduce a blocking profile to a single estimate.
pub fn read_plateau(profile: &BlockingProfile, rule: PlateauRule) -> Result<EstimationResult> {
    let entries = &profile.entries;
    let Some(last) = entries.last() else {
        return Err(EstimatorError::InvalidParameter {
            name: "blocking profile",
            reason: "must have at least one entry".to_string(),
        });
    };

    match rule {
        PlateauRule::TrailingWindow { window } => {
            if window == 0 {
                return Err(EstimatorError::InvalidParameter {
                    name: "plateau window",
                    reason: "must be at least 1".to_string(),
                });
            }
            let tail = &entries[entries.len().saturating_sub(window)..];
            let n_tail = tail.len() as f64;
            let mean = tail.iter().map(|entry| entry.mean).sum::<f64>() / n_tail;
            let var = tail.iter().map(|entry| entry.variance).sum::<f64>() / n_tail;
            Ok(EstimationResult::new(mean, var))
        }
        PlateauRule::ErrorBound => {
            for (idx, entry) in entries.iter().enumerate() {
                let max_low = entries[idx..]
                    .iter()
                    .map(|later| later.variance - later.variance_err())
                    .fold(f64::NEG_INFINITY, f64::max);

                if entry.variance > max_low {
                    log::debug!("plateau reached at block size {}", entry.block_size);
                    return Ok(EstimationResult::new(entry.mean, entry.variance));
                }
            }
            Ok(EstimationResult::new(last.mean, last.variance))
        }
    }
}
