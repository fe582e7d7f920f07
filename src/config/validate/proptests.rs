//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::estimator::EstimatorParams;
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = RunConfig> {
    (
        2usize..20,     // cv_folds
        1usize..24,     // n_angle_bins
        1usize..36,     // tuning_bins
        1e-3f64..100.0, // C
        any::<u64>(),   // seed
    )
        .prop_map(|(cv_folds, n_angle_bins, tuning_bins, c, seed)| RunConfig {
            analyses: vec![AnalysisEntry::Named("target_circAngle".to_string())],
            cv_folds,
            n_angle_bins,
            tuning_bins,
            seed,
            estimator: EstimatorParams { c, ..Default::default() },
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_single_fold_fails(config in arb_valid_config()) {
        let mut config = config;
        config.cv_folds = 1;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidCvFolds(1))
        ));
    }

    #[test]
    fn prop_non_positive_c_fails(config in arb_valid_config(), c in -10.0f64..=0.0) {
        let mut config = config;
        config.estimator.c = c;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidRegularization(_))
        ));
    }
}
