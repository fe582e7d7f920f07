//! Angle readout from classifier probabilities over orientation bins

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::circular::{encode, recombine};
use crate::error::{Error, Result};

/// How a probability vector becomes a single orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readout {
    /// Orientation of the most probable bin
    ArgMax,
    /// Probability-weighted circular mean of the bin orientations
    #[default]
    WeightedMean,
}

/// Predicted angle and signed error per trial from a trial × bin
/// probability matrix.
pub fn probabilities_to_angle(
    probas: ArrayView2<'_, f64>,
    bin_angles: &[f64],
    true_angles: &[f64],
    readout: Readout,
) -> Result<Vec<(f64, f64)>> {
    if probas.ncols() != bin_angles.len() {
        return Err(Error::ShapeMismatch { expected: vec![bin_angles.len()], actual: vec![probas.ncols()] });
    }
    if probas.nrows() != true_angles.len() {
        return Err(Error::ShapeMismatch { expected: vec![probas.nrows()], actual: vec![true_angles.len()] });
    }
    let pairs: Vec<_> = bin_angles.iter().map(|&a| encode(a)).collect();

    Ok(probas
        .rows()
        .into_iter()
        .zip(true_angles)
        .map(|(row, &truth)| {
            let (cos, sin) = match readout {
                Readout::ArgMax => {
                    let best = (0..row.len()).max_by(|&a, &b| row[a].total_cmp(&row[b])).unwrap_or(0);
                    pairs.get(best).map_or((0.0, 0.0), |p| (p.cos, p.sin))
                }
                Readout::WeightedMean => row
                    .iter()
                    .zip(&pairs)
                    .fold((0.0, 0.0), |(c, s), (&w, p)| (c + w * p.cos, s + w * p.sin)),
            };
            recombine(cos, sin, truth)
        })
        .collect())
}

/// Signed errors only.
pub fn classifier_errors(
    probas: ArrayView2<'_, f64>,
    bin_angles: &[f64],
    true_angles: &[f64],
    readout: Readout,
) -> Result<Vec<f64>> {
    Ok(probabilities_to_angle(probas, bin_angles, true_angles, readout)?
        .into_iter()
        .map(|(_, e)| e)
        .collect())
}
