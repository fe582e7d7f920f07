//! Validation error types
//!
//! Defines all validation error variants for run configurations.

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid cv_folds: {0} (must be >= 2)")]
    InvalidCvFolds(usize),

    #[error("Invalid n_angle_bins: {0} (must be > 0)")]
    InvalidAngleBins(usize),

    #[error("Invalid tuning_bins: {0} (must be > 0)")]
    InvalidTuningBins(usize),

    #[error("visibility_codes cannot be empty")]
    EmptyVisibilityCodes,

    #[error("Invalid regularization C: {0} (must be > 0.0)")]
    InvalidRegularization(f64),

    #[error("Invalid epsilon: {0} (must be >= 0.0)")]
    InvalidEpsilon(f64),

    #[error("Invalid max_iter: {0} (must be > 0)")]
    InvalidMaxIter(usize),

    #[error("Unknown analysis: {0} (not in the built-in catalogue)")]
    UnknownAnalysis(String),

    #[error("Invalid decoding type for '{name}': {value} (must be one of: categorize, regress, circ_regress)")]
    InvalidDecodingType { name: String, value: String },

    #[error("Invalid query for '{name}': {message}")]
    InvalidQuery { name: String, message: String },

    #[error("Duplicate analysis name: {0}")]
    DuplicateAnalysis(String),
}
