//! Decoding targets

use serde::Serialize;

use crate::config::DecodingType;
use crate::error::{Error, Result};

/// What an estimator is fit against.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Target {
    /// Class indices into `classes` (sorted distinct values)
    Classes { labels: Vec<usize>, classes: Vec<f64> },
    /// Continuous values
    Values(Vec<f64>),
    /// Orientations in degrees
    Angles(Vec<f64>),
}

impl Target {
    /// Build the target for a decoding type from raw column values.
    ///
    /// Missing (NaN) values are rejected: trials without a label must be
    /// filtered out by the analysis query or contrast first.
    pub fn from_values(decoding: DecodingType, values: &[f64]) -> Result<Self> {
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::data_msg(format!("trial {i} has no usable target value")));
        }
        Ok(match decoding {
            DecodingType::Categorize => {
                let mut classes = values.to_vec();
                classes.sort_by(f64::total_cmp);
                classes.dedup();
                let labels = values
                    .iter()
                    .map(|v| classes.iter().position(|c| c == v).unwrap_or_default())
                    .collect();
                Target::Classes { labels, classes }
            }
            DecodingType::Regress => Target::Values(values.to_vec()),
            DecodingType::CircularRegress { .. } => Target::Angles(values.to_vec()),
        })
    }

    /// Binary class target from booleans (false = class 0).
    pub fn binary(labels: &[bool]) -> Self {
        Target::Classes {
            labels: labels.iter().map(|&b| usize::from(b)).collect(),
            classes: vec![0.0, 1.0],
        }
    }

    /// Number of trials.
    pub fn len(&self) -> usize {
        match self {
            Target::Classes { labels, .. } => labels.len(),
            Target::Values(v) | Target::Angles(v) => v.len(),
        }
    }

    /// Whether there are no trials.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trials at the given indices; class lists are kept whole.
    pub fn subset(&self, indices: &[usize]) -> Self {
        match self {
            Target::Classes { labels, classes } => Target::Classes {
                labels: indices.iter().map(|&i| labels[i]).collect(),
                classes: classes.clone(),
            },
            Target::Values(v) => Target::Values(indices.iter().map(|&i| v[i]).collect()),
            Target::Angles(v) => Target::Angles(indices.iter().map(|&i| v[i]).collect()),
        }
    }

    /// Class labels, if categorical.
    pub fn labels(&self) -> Option<&[usize]> {
        match self {
            Target::Classes { labels, .. } => Some(labels),
            _ => None,
        }
    }

    /// Number of classes, if categorical.
    pub fn n_classes(&self) -> Option<usize> {
        match self {
            Target::Classes { classes, .. } => Some(classes.len()),
            _ => None,
        }
    }

    /// Distinct labels present among `indices`.
    pub fn distinct_labels(&self, indices: &[usize]) -> usize {
        match self {
            Target::Classes { labels, classes } => {
                let mut seen = vec![false; classes.len()];
                for &i in indices {
                    seen[labels[i]] = true;
                }
                seen.iter().filter(|&&s| s).count()
            }
            Target::Values(v) | Target::Angles(v) => {
                let mut vals: Vec<f64> = indices.iter().map(|&i| v[i]).collect();
                vals.sort_by(f64::total_cmp);
                vals.dedup();
                vals.len()
            }
        }
    }

    /// Values as numbers (class values for categorical targets).
    pub fn values(&self) -> Vec<f64> {
        match self {
            Target::Classes { labels, classes } => labels.iter().map(|&l| classes[l]).collect(),
            Target::Values(v) | Target::Angles(v) => v.clone(),
        }
    }
}
