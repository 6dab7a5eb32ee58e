//! Errors reported by the estimators.

use thiserror::Error;

/// Result type for estimator operations.
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Input validation failures of the estimators.
///
/// All of them are deterministic: the same input always fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// The sample has no observations.
    #[error("sample must not be empty")]
    EmptyInput,

    /// The sample is too short for the requested estimate.
    #[error("sample must have at least {required} values, but has {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The lag is outside `0..len`.
    #[error("lag must be in the range 0..{len}, but is {lag}")]
    InvalidLag { lag: usize, len: usize },

    /// The sample has zero variance where a ratio by the variance is taken.
    #[error("sample has zero variance")]
    DegenerateSample,

    /// An estimator parameter is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Fail with [`EstimatorError::InsufficientData`] unless `sample` has at least `required` values.
pub(crate) fn check_len(sample: &[f64], required: usize) -> Result<()> {
    if sample.is_empty() {
        return Err(EstimatorError::EmptyInput);
    }
    if sample.len() < required {
        return Err(EstimatorError::InsufficientData {
            required,
            actual: sample.len(),
        });
    }
    Ok(())
}
