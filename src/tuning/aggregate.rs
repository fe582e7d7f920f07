//! Cross-subject reduction

use ndarray::{Array, Dimension};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Elementwise reduction across subjects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    #[default]
    Mean,
    Median,
}

impl Reduction {
    fn reduce(&self, values: &mut [f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        match self {
            Reduction::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Reduction::Median => {
                values.sort_by(f64::total_cmp);
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            }
        }
    }
}

/// Reduce per-subject arrays elementwise.
///
/// Subjects given as `None` (no trials at this level) and non-finite
/// entries are left out of each element's reduction instead of counting as
/// zero. Returns `None` when no subject has data; an element with no finite
/// value is NaN.
pub fn aggregate_across_subjects<D: Dimension>(
    subjects: &[Option<Array<f64, D>>],
    reduction: Reduction,
) -> Result<Option<Array<f64, D>>> {
    let present: Vec<&Array<f64, D>> = subjects.iter().flatten().collect();
    let Some(first) = present.first() else {
        return Ok(None);
    };
    if let Some(bad) = present.iter().find(|a| a.shape() != first.shape()) {
        return Err(Error::ShapeMismatch { expected: first.shape().to_vec(), actual: bad.shape().to_vec() });
    }

    let columns: Vec<Vec<f64>> = present.iter().map(|a| a.iter().copied().collect()).collect();
    let mut scratch = Vec::with_capacity(columns.len());
    let reduced: Vec<f64> = (0..first.len())
        .map(|i| {
            scratch.clear();
            scratch.extend(columns.iter().map(|c| c[i]).filter(|v| v.is_finite()));
            reduction.reduce(&mut scratch)
        })
        .collect();

    Array::from_shape_vec(first.raw_dim(), reduced)
        .map(Some)
        .map_err(|e| Error::data_msg(e.to_string()))
}
