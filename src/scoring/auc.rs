//! Area under the ROC curve

use super::rank::average_ranks;
use crate::error::{Error, Result};

/// ROC AUC of `scores` for binary `positives`, via the Mann-Whitney U statistic.
///
/// Ties in `scores` count one half. Fails when either class is absent.
pub fn roc_auc(scores: &[f64], positives: &[bool]) -> Result<f64> {
    if scores.len() != positives.len() {
        return Err(Error::ShapeMismatch {
            expected: vec![positives.len()],
            actual: vec![scores.len()],
        });
    }
    let n_pos = positives.iter().filter(|&&p| p).count();
    let n_neg = positives.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(Error::data_msg(format!(
            "AUC needs both classes, got {n_pos} positive and {n_neg} negative trials"
        )));
    }

    let ranks = average_ranks(scores);
    let rank_sum: f64 = ranks.iter().zip(positives).filter(|(_, p)| **p).map(|(r, _)| r).sum();
    let (n_pos, n_neg) = (n_pos as f64, n_neg as f64);
    let u = rank_sum - n_pos * (n_pos + 1.0) / 2.0;
    Ok(u / (n_pos * n_neg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_separable_and_inverted() {
        let scores = [0.1, 0.2, 0.3, 0.8, 0.9];
        let labels = [false, false, false, true, true];
        assert_abs_diff_eq!(roc_auc(&scores, &labels).unwrap(), 1.0);
        let inverted: Vec<bool> = labels.iter().map(|l| !l).collect();
        assert_abs_diff_eq!(roc_auc(&scores, &inverted).unwrap(), 0.0);
    }

    #[test]
    fn test_all_tied_is_half() {
        let auc = roc_auc(&[0.5; 4], &[true, false, true, false]).unwrap();
        assert_abs_diff_eq!(auc, 0.5);
    }

    #[test]
    fn test_partial_overlap() {
        // positives {0.35, 0.8}, negatives {0.1, 0.4}: 3 of 4 pairs ordered
        let auc = roc_auc(&[0.1, 0.4, 0.35, 0.8], &[false, false, true, true]).unwrap();
        assert_abs_diff_eq!(auc, 0.75);
    }

    #[test]
    fn test_single_class_fails() {
        assert!(roc_auc(&[0.1, 0.2], &[true, true]).is_err());
        assert!(roc_auc(&[0.1], &[true, false]).is_err());
    }
}
