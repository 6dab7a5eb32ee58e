use crate::blocking::blocking_estimate_with;
use crate::bootstrap::{bootstrap_estimate, bootstrap_estimate_par};
use crate::config::AnalysisConfig;
use crate::equil::{equilibration_index, is_equilibrated};
use crate::error;
use crate::jackknife::jackknife_estimate;
use crate::stats::{autocorrelation_profile, naive_estimate};
use crate::types::EstimationResult;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Results of every estimator for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Number of values analyzed, after trimming.
    pub n_samples: usize,
    /// Number of leading values discarded as burn-in.
    pub i_equil: usize,
    /// Whether an equilibration index was found before the middle of the series.
    pub is_equil: bool,
    /// Integrated autocorrelation time, if the sample is not constant.
    pub autocorrelation_time: Option<f64>,
    pub naive: EstimationResult,
    pub blocking: EstimationResult,
    pub bootstrap: EstimationResult,
    pub jackknife: EstimationResult,
}

/// Runs all estimators over a sample.
pub struct Analyzer {
    cfg: AnalysisConfig,
}

impl Analyzer {
    pub fn new(cfg: AnalysisConfig) -> Self {
        Self { cfg }
    }

    /// Analyze `sample`, discarding its burn-in first if configured to.
    pub fn analyze(&self, sample: &[f64]) -> Result<Report> {
        let i_equil = equilibration_index(sample).context("failed to find equilibration")?;
        let is_equil = is_equilibrated(i_equil, sample.len());
        if !is_equil {
            log::warn!("sample does not seem to be equilibrated");
        }

        let sample = if self.cfg.equil.trim {
            log::info!("discarding {i_equil} values before equilibration");
            &sample[i_equil..]
        } else {
            sample
        };

        let naive = timed("naive", || naive_estimate(sample))?;

        let blk = &self.cfg.blocking;
        let blocking = timed("blocking", || {
            blocking_estimate_with(sample, blk.max_block_size, blk.plateau_rule())
        })?;

        let bootstrap = timed("bootstrap", || self.bootstrap(sample))?;

        let jackknife = timed("jackknife", || jackknife_estimate(sample))?;

        // A constant sample has no autocorrelation but still has valid error estimates.
        let autocorrelation_time = timed("autocorrelation", || autocorrelation_profile(sample))
            .map(|profile| profile.autocorrelation_time())
            .inspect_err(|error| log::warn!("{error:#}"))
            .ok();

        Ok(Report {
            n_samples: sample.len(),
            i_equil: if self.cfg.equil.trim { i_equil } else { 0 },
            is_equil,
            autocorrelation_time,
            naive,
            blocking,
            bootstrap,
            jackknife,
        })
    }

    fn bootstrap(&self, sample: &[f64]) -> error::Result<EstimationResult> {
        let boot = &self.cfg.bootstrap;
        let seed = match boot.seed {
            Some(seed) => seed,
            None => rand::rng().random(),
        };
        log::debug!("bootstrap seed is {seed}");

        if boot.parallel {
            bootstrap_estimate_par(sample, boot.n_resamples, seed)
        } else {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            bootstrap_estimate(sample, boot.n_resamples, &mut rng)
        }
    }
}

fn timed<T, F>(name: &str, estimator: F) -> Result<T>
where
    F: FnOnce() -> error::Result<T>,
{
    let start = Instant::now();
    let res = estimator().with_context(|| format!("{name} estimate failed"))?;
    log::info!("{name} took {:?}", start.elapsed());
    Ok(res)
}
