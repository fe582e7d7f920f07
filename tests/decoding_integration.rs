//! End-to-end decoding tests
//!
//! Synthetic orientation epochs go through the catalogue, the generalization
//! engine and the tuning summaries, using only the public API.

use approx::assert_abs_diff_eq;
use gatdecode::config::{default_analyses, find_analysis, subscores, AnalysisSpec, DecodingType};
use gatdecode::data::SyntheticOrientation;
use gatdecode::engine::GatConfig;
use gatdecode::pipeline::{run_analysis, summarize_subject, GroupSummary, SummaryOptions};
use gatdecode::tuning::{realign_vector, Reduction};
use ndarray::array;

fn config() -> GatConfig {
    GatConfig { n_jobs: 2, ..Default::default() }
}

// ============================================================================
// CIRCULAR DECODING
// ============================================================================

#[test]
fn circular_decoding_beats_chance_on_six_angles() {
    let epochs = SyntheticOrientation { n_trials: 60, n_times: 1, onset: 0, ..Default::default() }
        .generate()
        .unwrap();
    let spec = find_analysis("target_circAngle").unwrap().with_cv_folds(5);
    assert_abs_diff_eq!(spec.chance(), 1.0 / 6.0, epsilon = 1e-12);

    let record = run_analysis("s01", &spec, &epochs, None, &config()).unwrap();
    assert_eq!(record.scores.dim(), (1, 1));
    assert_eq!(record.predictions.n_outputs(), 2);
    assert_eq!(record.n_trials(), 60);

    let r = record.scores[[0, 0]];
    assert!(r > 0.0, "circular-linear correlation = {r}");
    assert!(r > spec.chance(), "circular-linear correlation = {r}");
}

#[test]
fn every_trial_is_predicted_exactly_once() {
    let epochs = SyntheticOrientation { n_trials: 36, n_times: 2, onset: 0, grid_side: 4, ..Default::default() }
        .generate()
        .unwrap();
    let spec = find_analysis("target_circAngle").unwrap().with_cv_folds(4);
    let record = run_analysis("s01", &spec, &epochs, None, &config()).unwrap();

    assert_eq!(record.folds.len(), 36);
    let mut counts = [0usize; 4];
    for &f in &record.folds {
        counts[f] += 1;
    }
    assert_eq!(counts, [9, 9, 9, 9]);
    assert!(record.predictions.view().iter().all(|v| v.is_finite()));
}

#[test]
fn group_summary_pools_subjects() {
    let options = SummaryOptions::default();
    let spec = find_analysis("target_circAngle").unwrap().with_cv_folds(3);

    let subjects: Vec<_> = (0..2u64)
        .map(|s| {
            let epochs = SyntheticOrientation {
                n_trials: 48,
                n_times: 2,
                onset: 0,
                grid_side: 4,
                seed: 7 + s,
                ..Default::default()
            }
            .generate()
            .unwrap();
            let record = run_analysis(&format!("s{s}"), &spec, &epochs, None, &config()).unwrap();
            summarize_subject(&record, &options).unwrap()
        })
        .collect();

    for s in &subjects {
        assert_eq!(s.tuning.dim(), (2, 6));
        for row in s.tuning.rows() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
        assert_eq!(s.tuning_by_visibility.len(), 4);
    }

    let group = GroupSummary::from_subjects(&subjects, Reduction::Mean).unwrap();
    assert_eq!(group.n_subjects, 2);
    let scores = group.diagonal_scores.unwrap();
    let expected = (subjects[0].diagonal_scores[0] + subjects[1].diagonal_scores[0]) / 2.0;
    assert_abs_diff_eq!(scores[0], expected, epsilon = 1e-12);
}

#[test]
fn orientation_classifier_realigns_probabilities() {
    let epochs = SyntheticOrientation { n_trials: 48, n_times: 2, onset: 0, grid_side: 4, ..Default::default() }
        .generate()
        .unwrap();
    let spec = AnalysisSpec::new("orientation_target", DecodingType::Categorize).with_cv_folds(4);
    let record = run_analysis("s01", &spec, &epochs, None, &config()).unwrap();
    assert_eq!(record.predictions.n_outputs(), 6);

    let summary = summarize_subject(&record, &SummaryOptions::default()).unwrap();
    let probas = summary.probability_tuning.unwrap();
    assert_eq!(probas.dim(), (2, 6));
    let centre = probas[[0, 3]];
    assert!(probas.row(0).iter().all(|&p| p <= centre), "row = {:?}", probas.row(0));
    assert!(summary.probability_tuning_by_visibility.iter().all(|(_, c)| c.is_some()));
}

// ============================================================================
// CATALOGUE AND TUNING
// ============================================================================

#[test]
fn subscores_triple_the_catalogue() {
    let base = default_analyses();
    let all = subscores(&base);
    assert_eq!(all.len(), 3 * base.len());

    let names: Vec<&str> = all.iter().map(|a| a.name()).collect();
    assert!(names.contains(&"detect_seen_pst-seen"));
    assert!(names.contains(&"detect_seen_pst-unseen"));

    let unseen = all.iter().find(|a| a.name() == "detect_seen_pst-unseen").unwrap();
    assert_eq!(unseen.query(), Some("(target_present == True) and detect_seen == False"));
    assert_eq!(unseen.decoding(), DecodingType::Categorize);
}

#[test]
fn realignment_centres_the_true_class() {
    let probas = array![0.1, 0.1, 0.6, 0.1, 0.1, 0.0];
    let realigned = realign_vector(probas.view(), 2, 0);
    assert_eq!(realigned.to_vec(), vec![0.6, 0.1, 0.1, 0.0, 0.1, 0.1]);

    let probas = array![0.1, 0.2, 0.7, 0.0, 0.0, 0.0];
    let realigned = realign_vector(probas.view(), 2, 3);
    assert_eq!(realigned.to_vec(), vec![0.0, 0.1, 0.2, 0.7, 0.0, 0.0]);
}
