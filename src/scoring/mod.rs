//! Scorer library
//!
//! Pure functions from (predictions, truth) over the trial axis to one
//! scalar per (train time, test time) cell:
//!
//! - `auc`: ROC AUC on the positive-class probability (one-vs-rest mean
//!   for more than two classes)
//! - `rank`: Spearman rank correlation (and Pearson)
//! - `circular`: circular-linear correlation and absolute angle error
//!
//! Constant inputs to correlations return 0 instead of failing.

mod auc;
mod circular;
mod rank;

#[cfg(test)]
mod tests;

pub use auc::roc_auc;
pub use circular::{circular_linear_correlation, mean_absolute_angle_error};
pub use rank::{average_ranks, pearson, spearman};

use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::circular::{decode, HALF_TURN};
use crate::config::{DecodingType, ScoringPlan};
use crate::estimator::Target;
use crate::error::{Error, Result};

/// Available scorers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// ROC AUC; macro-averaged one-vs-rest beyond two classes
    Auc,
    /// Spearman rank correlation
    Spearman,
    /// Circular-linear correlation between true and predicted orientation
    CircularLinear,
    /// Mean absolute circular error in degrees
    AngleError,
}

impl Scorer {
    /// Scorer (and auxiliary error function) paired with a decoding type.
    pub fn for_decoding(decoding: &DecodingType) -> ScoringPlan {
        decoding.scoring()
    }

    /// Whether higher values are better for this scorer
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Scorer::AngleError)
    }

    /// Get scorer name as string
    pub fn name(&self) -> &'static str {
        match self {
            Scorer::Auc => "AUC",
            Scorer::Spearman => "Spearman",
            Scorer::CircularLinear => "CircularLinear",
            Scorer::AngleError => "AngleError",
        }
    }

    /// Score predictions (trial × output) against the target.
    ///
    /// Output layouts: class probabilities for classifiers, one column for
    /// regressors, `(cos, sin)` for circular regressors.
    pub fn score(&self, predictions: ArrayView2<'_, f64>, target: &Target) -> Result<f64> {
        if predictions.len_of(Axis(0)) != target.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![target.len()],
                actual: vec![predictions.len_of(Axis(0))],
            });
        }
        match self {
            Scorer::Auc => {
                let (labels, n_classes) = match target {
                    Target::Classes { labels, classes } => (labels, classes.len()),
                    _ => return Err(Error::data_msg("AUC needs a categorical target")),
                };
                if n_classes > 2 {
                    return one_vs_rest_auc(predictions, labels, n_classes);
                }
                let positive = predictions.ncols().saturating_sub(1);
                let scores = predictions.column(positive).to_vec();
                let positives: Vec<bool> = labels.iter().map(|&l| l == 1).collect();
                roc_auc(&scores, &positives)
            }
            Scorer::Spearman => {
                let predicted = predictions.column(0).to_vec();
                Ok(spearman(&predicted, &target.values()))
            }
            Scorer::CircularLinear | Scorer::AngleError => {
                let truth = match target {
                    Target::Angles(a) => a,
                    _ => return Err(Error::data_msg(format!("{self} needs an angular target"))),
                };
                let predicted = decode_rows(predictions)?;
                Ok(match self {
                    Scorer::CircularLinear => {
                        // the true orientation is the linear variable, taken on [0°, 180°)
                        let linear: Vec<f64> = truth.iter().map(|a| a.rem_euclid(HALF_TURN)).collect();
                        circular_linear_correlation(&linear, &predicted)
                    }
                    _ => mean_absolute_angle_error(&predicted, truth),
                })
            }
        }
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Macro-averaged one-vs-rest AUC over the class probability columns.
///
/// Classes absent from (or making up all of) the scored trials are left out.
fn one_vs_rest_auc(predictions: ArrayView2<'_, f64>, labels: &[usize], n_classes: usize) -> Result<f64> {
    if predictions.ncols() != n_classes {
        return Err(Error::ShapeMismatch {
            expected: vec![labels.len(), n_classes],
            actual: predictions.shape().to_vec(),
        });
    }
    let mut aucs = Vec::with_capacity(n_classes);
    for class in 0..n_classes {
        let positives: Vec<bool> = labels.iter().map(|&l| l == class).collect();
        if positives.iter().all(|&p| p) || !positives.iter().any(|&p| p) {
            continue;
        }
        aucs.push(roc_auc(&predictions.column(class).to_vec(), &positives)?);
    }
    if aucs.is_empty() {
        return Err(Error::data_msg("AUC needs at least two classes among the scored trials"));
    }
    Ok(aucs.iter().sum::<f64>() / aucs.len() as f64)
}

fn decode_rows(predictions: ArrayView2<'_, f64>) -> Result<Vec<f64>> {
    if predictions.ncols() != 2 {
        return Err(Error::data_msg(format!(
            "circular predictions need 2 outputs (cos, sin), got {}",
            predictions.ncols()
        )));
    }
    Ok(predictions.rows().into_iter().map(|r| decode(r[0], r[1])).collect())
}
