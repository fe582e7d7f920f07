//! Prediction tensor

use ndarray::{s, Array3, Array4, ArrayView2, ArrayView4, ArrayViewMut1, Axis};
use serde::Serialize;

use crate::circular::recombine_prediction;
use crate::error::Result;

/// Out-of-fold predictions `[train_time][test_time][trial][output]`.
///
/// The output axis holds class probabilities for classifiers, a single
/// value for regressors and `(cos, sin)` for circular regressors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionTensor {
    data: Array4<f64>,
}

impl PredictionTensor {
    /// Zero-filled tensor.
    pub fn zeros(n_train_times: usize, n_test_times: usize, n_trials: usize, n_outputs: usize) -> Self {
        Self { data: Array4::zeros((n_train_times, n_test_times, n_trials, n_outputs)) }
    }

    /// Wrap existing predictions.
    pub fn from_array(data: Array4<f64>) -> Self {
        Self { data }
    }

    pub fn n_train_times(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn n_test_times(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn n_trials(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn n_outputs(&self) -> usize {
        self.data.len_of(Axis(3))
    }

    /// Predictions (trial × output) for one (train, test) cell.
    pub fn cell(&self, train_time: usize, test_time: usize) -> ArrayView2<'_, f64> {
        self.data.slice(s![train_time, test_time, .., ..])
    }

    pub(crate) fn trial_mut(&mut self, train_time: usize, test_time: usize, trial: usize) -> ArrayViewMut1<'_, f64> {
        self.data.slice_mut(s![train_time, test_time, trial, ..])
    }

    /// Same-time predictions `[time][trial][output]`.
    pub fn diagonal(&self) -> Array3<f64> {
        let n = self.n_train_times().min(self.n_test_times());
        let mut diag = Array3::zeros((n, self.n_trials(), self.n_outputs()));
        for t in 0..n {
            diag.index_axis_mut(Axis(0), t).assign(&self.cell(t, t));
        }
        diag
    }

    /// Predicted angles and signed errors `[train][test][trial]` of a
    /// circular tensor.
    pub fn recombine(&self, true_angles: &[f64]) -> Result<(Array3<f64>, Array3<f64>)> {
        recombine_prediction(self.data.view(), true_angles)
    }

    pub fn view(&self) -> ArrayView4<'_, f64> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array4<f64> {
        self.data
    }
}
