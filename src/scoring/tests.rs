//! Tests for scorer dispatch

use super::*;
use crate::circular::encode;
use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};

#[test]
fn test_auc_on_probabilities() {
    let probas = array![[0.9, 0.1], [0.8, 0.2], [0.3, 0.7], [0.1, 0.9]];
    let target = Target::binary(&[false, false, true, true]);
    assert_abs_diff_eq!(Scorer::Auc.score(probas.view(), &target).unwrap(), 1.0);

    let inverted = Target::binary(&[true, true, false, false]);
    assert_abs_diff_eq!(Scorer::Auc.score(probas.view(), &inverted).unwrap(), 0.0);
}

#[test]
fn test_auc_multiclass_is_one_vs_rest_mean() {
    let probas = array![
        [0.8, 0.1, 0.1],
        [0.6, 0.3, 0.1],
        [0.1, 0.7, 0.2],
        [0.2, 0.2, 0.6],
    ];
    let target = Target::Classes { labels: vec![0, 0, 1, 2], classes: vec![15.0, 75.0, 135.0] };
    assert_abs_diff_eq!(Scorer::Auc.score(probas.view(), &target).unwrap(), 1.0);

    let uniform = Array2::from_elem((4, 3), 1.0 / 3.0);
    assert_abs_diff_eq!(Scorer::Auc.score(uniform.view(), &target).unwrap(), 0.5);
}

#[test]
fn test_auc_multiclass_skips_absent_classes() {
    // class 2 never occurs among the scored trials
    let probas = array![[0.9, 0.1, 0.0], [0.2, 0.8, 0.0], [0.7, 0.2, 0.1]];
    let target = Target::Classes { labels: vec![0, 1, 0], classes: vec![1.0, 2.0, 3.0] };
    assert_abs_diff_eq!(Scorer::Auc.score(probas.view(), &target).unwrap(), 1.0);
}

#[test]
fn test_auc_multiclass_checks_width() {
    let probas = Array2::from_elem((3, 2), 0.5);
    let target = Target::Classes { labels: vec![0, 1, 2], classes: vec![1.0, 2.0, 3.0] };
    assert!(matches!(
        Scorer::Auc.score(probas.view(), &target),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_spearman_dispatch() {
    let preds = array![[0.1], [0.4], [0.2], [0.9]];
    let target = Target::Values(vec![1.0, 3.0, 2.0, 4.0]);
    assert_abs_diff_eq!(Scorer::Spearman.score(preds.view(), &target).unwrap(), 1.0);

    let flat = Array2::from_elem((4, 1), 0.5);
    assert_eq!(Scorer::Spearman.score(flat.view(), &target).unwrap(), 0.0);
}

#[test]
fn test_circular_scorers_on_exact_predictions() {
    let truth = vec![15.0, 45.0, 75.0, 105.0, 135.0, 165.0];
    let mut preds = Array2::zeros((6, 2));
    for (i, &a) in truth.iter().enumerate() {
        let p = encode(a);
        preds[[i, 0]] = p.cos;
        preds[[i, 1]] = p.sin;
    }
    let target = Target::Angles(truth);
    let r = Scorer::CircularLinear.score(preds.view(), &target).unwrap();
    assert!(r > 0.5, "r = {r}");
    let err = Scorer::AngleError.score(preds.view(), &target).unwrap();
    assert_abs_diff_eq!(err, 0.0, epsilon = 1e-9);
}

#[test]
fn test_circular_linear_ignores_half_turns_in_truth() {
    let truth = vec![15.0, 45.0, 75.0, 105.0, 135.0, 165.0, 15.0, 75.0];
    let preds = array![
        [1.0, 0.2],
        [0.1, 0.9],
        [-0.8, 0.3],
        [-0.9, -0.2],
        [0.2, -1.0],
        [0.7, -0.4],
        [0.6, 0.6],
        [-0.5, 0.5]
    ];
    let shifted: Vec<f64> = truth.iter().enumerate().map(|(i, a)| a + 180.0 * (i % 3) as f64 - 180.0).collect();
    let r = Scorer::CircularLinear.score(preds.view(), &Target::Angles(truth)).unwrap();
    let r_shifted = Scorer::CircularLinear.score(preds.view(), &Target::Angles(shifted)).unwrap();
    assert_abs_diff_eq!(r, r_shifted, epsilon = 1e-9);
}

#[test]
fn test_length_mismatch() {
    let preds = Array2::zeros((2, 1));
    let target = Target::Values(vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        Scorer::Spearman.score(preds.view(), &target),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_circular_needs_two_outputs() {
    let preds = Array2::zeros((2, 1));
    let target = Target::Angles(vec![1.0, 2.0]);
    assert!(Scorer::CircularLinear.score(preds.view(), &target).is_err());
}
