//! Error estimation for the mean of correlated Monte Carlo samples.
//!
//! The estimators are pure functions over a `&[f64]` sample:
//!
//! - [`stats::naive_estimate`] assumes uncorrelated values,
//! - [`blocking::blocking_estimate`] averages contiguous blocks until they decorrelate,
//! - [`bootstrap::bootstrap_estimate`] resamples with replacement,
//! - [`jackknife::jackknife_estimate`] leaves one value out at a time.
//!
//! [`stats::autocorrelation_profile`] is available as a diagnostic, and
//! [`analysis::Analyzer`] runs everything at once.

pub mod analysis;
pub mod blocking;
pub mod bootstrap;
pub mod config;
pub mod data;
pub mod equil;
pub mod error;
pub mod jackknife;
pub mod stats;
pub mod types;

pub use error::{EstimatorError, Result};
pub use types::{AutocorrelationProfile, BlockingEntry, BlockingProfile, EstimationResult};
