//! Probability realignment for classifiers over orientation bins
//!
//! Rotating each trial's probability vector so that its true bin lands on a
//! fixed reference index lets probability shapes be averaged across trials
//! with different true orientations.

use ndarray::{s, Array1, Array2, Array4, ArrayView1, ArrayView2};

use crate::engine::PredictionTensor;
use crate::error::{Error, Result};

/// Rotate one probability vector: `out[j] = p[(j + true_bin - reference) mod n]`.
pub fn realign_vector(probas: ArrayView1<'_, f64>, true_bin: usize, reference: usize) -> Array1<f64> {
    let n = probas.len();
    if n == 0 {
        return Array1::zeros(0);
    }
    let shift = (true_bin % n + n - reference % n) % n;
    Array1::from_shape_fn(n, |j| probas[(j + shift) % n])
}

/// Realign every trial (row) of a trial × bin probability matrix.
pub fn realign(probas: ArrayView2<'_, f64>, true_bins: &[usize], reference: usize) -> Result<Array2<f64>> {
    check_bins(probas.nrows(), probas.ncols(), true_bins)?;
    let mut out = Array2::zeros(probas.raw_dim());
    for ((mut row, src), &b) in out.rows_mut().into_iter().zip(probas.rows()).zip(true_bins) {
        row.assign(&realign_vector(src, b, reference));
    }
    Ok(out)
}

/// Realign a whole categorize-over-angle prediction tensor.
pub fn realign_tensor(tensor: &PredictionTensor, true_bins: &[usize], reference: usize) -> Result<Array4<f64>> {
    check_bins(tensor.n_trials(), tensor.n_outputs(), true_bins)?;
    let mut out = tensor.view().to_owned();
    for t in 0..tensor.n_train_times() {
        for u in 0..tensor.n_test_times() {
            let cell = realign(tensor.cell(t, u), true_bins, reference)?;
            out.slice_mut(s![t, u, .., ..]).assign(&cell);
        }
    }
    Ok(out)
}

/// Mean realigned probability per bin along the diagonal, `[time][bin]`,
/// over the trials in `trials`.
pub fn mean_realigned_diagonal(realigned: &Array4<f64>, trials: &[usize]) -> Result<Array2<f64>> {
    let (n_train, n_test, _, n_bins) = realigned.dim();
    if trials.is_empty() {
        return Err(Error::data_msg("no trials to average"));
    }
    let n = n_train.min(n_test);
    let mut out = Array2::zeros((n, n_bins));
    for t in 0..n {
        let mut row = out.row_mut(t);
        for &i in trials {
            row += &realigned.slice(s![t, t, i, ..]);
        }
        row /= trials.len() as f64;
    }
    Ok(out)
}

fn check_bins(n_trials: usize, n_bins: usize, true_bins: &[usize]) -> Result<()> {
    if true_bins.len() != n_trials {
        return Err(Error::ShapeMismatch { expected: vec![n_trials], actual: vec![true_bins.len()] });
    }
    if let Some(&b) = true_bins.iter().find(|&&b| b >= n_bins) {
        return Err(Error::data_msg(format!("true bin {b} out of range for {n_bins} bins")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rotates_true_bin_to_reference() {
        let p = array![0.1, 0.1, 0.6, 0.1, 0.1, 0.0];
        let r = realign_vector(p.view(), 2, 0);
        assert_eq!(r, array![0.6, 0.1, 0.1, 0.0, 0.1, 0.1]);
    }

    #[test]
    fn test_wraps_when_reference_exceeds_true_bin() {
        let p = array![0.7, 0.1, 0.2];
        let r = realign_vector(p.view(), 0, 2);
        assert_eq!(r[2], 0.7);
        assert_eq!(r, array![0.1, 0.2, 0.7]);
    }

    #[test]
    fn test_matrix_realignment_checks_bins() {
        let p = array![[0.5, 0.5], [0.2, 0.8]];
        assert!(realign(p.view(), &[0, 2], 0).is_err());
        assert!(realign(p.view(), &[0], 0).is_err());
        let r = realign(p.view(), &[0, 1], 0).unwrap();
        assert_eq!(r, array![[0.5, 0.5], [0.8, 0.2]]);
    }

    #[test]
    fn test_mean_realigned_diagonal() {
        let mut tensor = PredictionTensor::zeros(1, 1, 2, 3);
        tensor.trial_mut(0, 0, 0).assign(&array![0.8, 0.1, 0.1]);
        tensor.trial_mut(0, 0, 1).assign(&array![0.1, 0.8, 0.1]);
        let realigned = realign_tensor(&tensor, &[0, 1], 0).unwrap();
        let mean = mean_realigned_diagonal(&realigned, &[0, 1]).unwrap();
        assert!((mean[[0, 0]] - 0.8).abs() < 1e-12);
        assert!(mean_realigned_diagonal(&realigned, &[]).is_err());
    }
}
