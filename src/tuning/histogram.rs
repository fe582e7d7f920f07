//! Tuning curves from signed circular errors

use ndarray::{Array2, Array3, Axis};
use serde::Serialize;

use crate::circular::HALF_TURN;
use crate::error::{Error, Result};

/// Proportion of trials per error bin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TuningCurve {
    bins: Vec<(f64, f64)>,
}

impl TuningCurve {
    /// `(bin_center_deg, proportion)` pairs, ordered from -90° upwards.
    pub fn bins(&self) -> &[(f64, f64)] {
        &self.bins
    }

    pub fn centers(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.0).collect()
    }

    pub fn proportions(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.1).collect()
    }

    /// Total mass: 1 for non-empty input, 0 otherwise.
    pub fn mass(&self) -> f64 {
        self.bins.iter().map(|b| b.1).sum()
    }
}

/// Bin index of an error in (-90, 90]; +90 wraps onto the first bin.
fn bin_index(error: f64, n_bins: usize) -> usize {
    let width = HALF_TURN / n_bins as f64;
    let idx = ((error + HALF_TURN / 2.0) / width).floor();
    if idx < 0.0 {
        0
    } else {
        (idx as usize) % n_bins
    }
}

/// Histogram signed errors into `n_bins` equal-width bins over (-90°, 90°].
///
/// Non-finite errors are ignored. An empty input gives all-zero proportions.
pub fn build_tuning_curve(errors: &[f64], n_bins: usize) -> Result<TuningCurve> {
    let counts = bin_counts(errors.iter().copied(), n_bins)?;
    let total: usize = counts.iter().sum();
    let width = HALF_TURN / n_bins as f64;
    let bins = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let center = -HALF_TURN / 2.0 + (i as f64 + 0.5) * width;
            let prop = if total == 0 { 0.0 } else { c as f64 / total as f64 };
            (center, prop)
        })
        .collect();
    Ok(TuningCurve { bins })
}

fn bin_counts(errors: impl Iterator<Item = f64>, n_bins: usize) -> Result<Vec<usize>> {
    if n_bins == 0 {
        return Err(Error::config("tuning", "number of bins must be > 0"));
    }
    let mut counts = vec![0usize; n_bins];
    for e in errors.filter(|e| e.is_finite()) {
        counts[bin_index(e, n_bins)] += 1;
    }
    Ok(counts)
}

/// Tuning curve of every (train, test) cell of a `[train][test][trial]`
/// error tensor, as `[train][test][bin]` proportions.
pub fn tuning_tensor(errors: &Array3<f64>, n_bins: usize) -> Result<Array3<f64>> {
    let (n_train, n_test, _) = errors.dim();
    let mut out = Array3::zeros((n_train, n_test, n_bins));
    for t in 0..n_train {
        for u in 0..n_test {
            let trials = errors.index_axis(Axis(0), t);
            let curve = build_tuning_curve(&trials.index_axis(Axis(0), u).to_vec(), n_bins)?;
            for (b, (_, p)) in curve.bins().iter().enumerate() {
                out[[t, u, b]] = *p;
            }
        }
    }
    Ok(out)
}

/// Same-time curves `[time][bin]` of a `[train][test][bin]` tensor.
pub fn diagonal(tuning: &Array3<f64>) -> Array2<f64> {
    let (n_train, n_test, n_bins) = tuning.dim();
    let n = n_train.min(n_test);
    Array2::from_shape_fn((n, n_bins), |(t, b)| tuning[[t, t, b]])
}
