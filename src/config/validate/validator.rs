//! Configuration validation logic
//!
//! Validates run configurations for correctness before any fitting.

use std::collections::HashSet;

use super::error::ValidationError;
use crate::config::catalog::find_analysis;
use crate::config::schema::{AnalysisEntry, RunConfig};
use crate::config::DecodingType;
use crate::data::Predicate;

/// Validate a run configuration
///
/// Checks:
/// - Numeric values are in valid ranges
/// - Named analyses exist in the catalogue
/// - Inline decoding types and queries parse
pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.cv_folds < 2 {
        return Err(ValidationError::InvalidCvFolds(config.cv_folds));
    }
    if config.n_angle_bins == 0 {
        return Err(ValidationError::InvalidAngleBins(config.n_angle_bins));
    }
    if config.tuning_bins == 0 {
        return Err(ValidationError::InvalidTuningBins(config.tuning_bins));
    }
    if config.visibility_codes.is_empty() {
        return Err(ValidationError::EmptyVisibilityCodes);
    }

    let params = &config.estimator;
    if params.c <= 0.0 || !params.c.is_finite() {
        return Err(ValidationError::InvalidRegularization(params.c));
    }
    if params.epsilon < 0.0 || !params.epsilon.is_finite() {
        return Err(ValidationError::InvalidEpsilon(params.epsilon));
    }
    if params.max_iter == 0 {
        return Err(ValidationError::InvalidMaxIter(params.max_iter));
    }

    let mut names = HashSet::new();
    for entry in &config.analyses {
        if !names.insert(entry.name()) {
            return Err(ValidationError::DuplicateAnalysis(entry.name().to_string()));
        }
        match entry {
            AnalysisEntry::Named(name) => {
                find_analysis(name).map_err(|_| ValidationError::UnknownAnalysis(name.clone()))?;
            }
            AnalysisEntry::Inline(a) => {
                a.decoding.parse::<DecodingType>().map_err(|_| ValidationError::InvalidDecodingType {
                    name: a.name.clone(),
                    value: a.decoding.clone(),
                })?;
                if let Some(q) = &a.query {
                    Predicate::parse(q).map_err(|e| ValidationError::InvalidQuery {
                        name: a.name.clone(),
                        message: e.to_string(),
                    })?;
                }
            }
        }
    }

    Ok(())
}
