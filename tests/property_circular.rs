//! Property tests for the circular codec, fold planning and tuning histograms
//!
//! - decode(encode(θ)) recovers θ modulo 180°
//! - signed errors stay inside (-90°, 90°]
//! - folds partition the trials
//! - tuning proportions sum to one

use gatdecode::circular::{decode, encode, recombine, signed_error};
use gatdecode::engine::{KFold, StratifiedKFold};
use gatdecode::tuning::build_tuning_curve;
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Codec
// =============================================================================

proptest! {
    #[test]
    fn prop_codec_recovers_orientation(angle in -720.0f64..720.0) {
        let pair = encode(angle);
        let back = decode(pair.cos, pair.sin);
        prop_assert!((-90.0..90.0).contains(&back));
        prop_assert!(signed_error(back, angle).abs() < 1e-9);
    }

    #[test]
    fn prop_codec_ignores_amplitude(angle in -90.0f64..90.0, scale in 0.01f64..100.0) {
        let pair = encode(angle);
        let a = decode(pair.cos, pair.sin);
        let b = decode(scale * pair.cos, scale * pair.sin);
        prop_assert!(signed_error(a, b).abs() < 1e-9);
    }

    #[test]
    fn prop_signed_error_is_bounded(p in -1000.0f64..1000.0, t in -1000.0f64..1000.0) {
        let e = signed_error(p, t);
        prop_assert!(e > -90.0 && e <= 90.0);
    }

    #[test]
    fn prop_recombine_matches_error(truth in 0.0f64..180.0, offset in -89.0f64..89.0) {
        let pair = encode(truth + offset);
        let (_, error) = recombine(pair.cos, pair.sin, truth);
        prop_assert!((error - offset).abs() < 1e-6);
    }
}

// =============================================================================
// Fold planning
// =============================================================================

proptest! {
    #[test]
    fn prop_kfold_partitions_trials(n in 2usize..200, k in 2usize..10, seed in any::<u64>()) {
        prop_assume!(k <= n);
        let plan = KFold::new(k).with_seed(seed).plan(n).unwrap();
        let mut seen = vec![false; n];
        for (train, test) in plan.splits() {
            prop_assert_eq!(train.len() + test.len(), n);
            prop_assert!(!test.is_empty());
            for i in test {
                prop_assert!(!seen[i]);
                seen[i] = true;
            }
        }
        prop_assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn prop_stratified_balances_classes(labels in vec(0usize..3, 12..120), k in 2usize..5) {
        let plan = StratifiedKFold::new(k).with_seed(1).plan(&labels).unwrap();
        for class in 0..3 {
            let counts: Vec<usize> = (0..k)
                .map(|f| plan.test_indices(f).iter().filter(|&&i| labels[i] == class).count())
                .collect();
            let max = counts.iter().max().copied().unwrap_or(0);
            let min = counts.iter().min().copied().unwrap_or(0);
            prop_assert!(max - min <= 1, "class {} counts {:?}", class, counts);
        }
    }
}

// =============================================================================
// Tuning histograms
// =============================================================================

proptest! {
    #[test]
    fn prop_tuning_mass_is_one(errors in vec(-90.0f64..=90.0, 1..300), n_bins in 1usize..24) {
        let curve = build_tuning_curve(&errors, n_bins).unwrap();
        prop_assert_eq!(curve.proportions().len(), n_bins);
        prop_assert!((curve.mass() - 1.0).abs() < 1e-9);
    }
}
