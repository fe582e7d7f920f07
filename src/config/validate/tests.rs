//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;

fn create_valid_config() -> RunConfig {
    RunConfig {
        analyses: vec![
            AnalysisEntry::Named("target_present".to_string()),
            AnalysisEntry::Inline(InlineAnalysis {
                name: "tilt".to_string(),
                decoding: "categorize".to_string(),
                condition: Some("probe_tilt".to_string()),
                query: Some("target_present == True".to_string()),
            }),
        ],
        ..Default::default()
    }
}

#[test]
fn test_valid_config() {
    assert!(validate_config(&create_valid_config()).is_ok());
}

#[test]
fn test_default_config_is_valid() {
    assert!(validate_config(&RunConfig::default()).is_ok());
}

#[test]
fn test_invalid_cv_folds() {
    let mut config = create_valid_config();
    config.cv_folds = 0;
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidCvFolds(0)));
}

#[test]
fn test_invalid_bins() {
    let mut config = create_valid_config();
    config.n_angle_bins = 0;
    assert!(matches!(validate_config(&config), Err(ValidationError::InvalidAngleBins(0))));

    let mut config = create_valid_config();
    config.tuning_bins = 0;
    assert!(matches!(validate_config(&config), Err(ValidationError::InvalidTuningBins(0))));
}

#[test]
fn test_empty_visibility_codes() {
    let mut config = create_valid_config();
    config.visibility_codes.clear();
    assert!(matches!(validate_config(&config), Err(ValidationError::EmptyVisibilityCodes)));
}

#[test]
fn test_unknown_analysis() {
    let mut config = create_valid_config();
    config.analyses.push(AnalysisEntry::Named("nonexistent".to_string()));
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownAnalysis(ref n) if n == "nonexistent"));
}

#[test]
fn test_invalid_decoding_type() {
    let mut config = create_valid_config();
    if let AnalysisEntry::Inline(a) = &mut config.analyses[1] {
        a.decoding = "cluster".to_string();
    }
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("cluster"));
}

#[test]
fn test_invalid_query() {
    let mut config = create_valid_config();
    if let AnalysisEntry::Inline(a) = &mut config.analyses[1] {
        a.query = Some("target_present ==".to_string());
    }
    assert!(matches!(validate_config(&config), Err(ValidationError::InvalidQuery { .. })));
}

#[test]
fn test_duplicate_analysis() {
    let mut config = create_valid_config();
    config.analyses.push(AnalysisEntry::Named("target_present".to_string()));
    assert!(matches!(validate_config(&config), Err(ValidationError::DuplicateAnalysis(_))));
}
