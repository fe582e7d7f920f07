//! Linear support-vector regression
//!
//! Dual coordinate descent for the L2-regularized, epsilon-insensitive
//! (L1-loss) SVR. The intercept is learned as the weight of a constant
//! feature equal to 1, so it is regularized like the other weights.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Estimator, EstimatorParams, Target};
use crate::error::{Error, Result};

/// Fitted linear model `w·x + b`.
#[derive(Clone, Debug, Default)]
pub(crate) struct LinearModel {
    pub(crate) weights: Array1<f64>,
    pub(crate) bias: f64,
}

impl LinearModel {
    pub(crate) fn zeros(n_features: usize) -> Self {
        Self { weights: Array1::zeros(n_features), bias: 0.0 }
    }

    pub(crate) fn decision(&self, row: ArrayView1<'_, f64>) -> f64 {
        self.weights.dot(&row) + self.bias
    }

    /// `w += d·x`, including the constant feature.
    pub(crate) fn step(&mut self, d: f64, row: ArrayView1<'_, f64>) {
        self.weights.scaled_add(d, &row);
        self.bias += d;
    }

    pub(crate) fn decision_function(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        x.dot(&self.weights) + self.bias
    }
}

/// Squared norm of each row plus the constant feature.
pub(crate) fn diagonal(x: ArrayView2<'_, f64>) -> Vec<f64> {
    x.rows().into_iter().map(|r| r.dot(&r) + 1.0).collect()
}

/// Linear SVR with C-bounded dual variables.
#[derive(Clone, Debug)]
pub struct LinearSvr {
    params: EstimatorParams,
    model: Option<LinearModel>,
}

impl LinearSvr {
    /// Unfitted regressor.
    pub fn new(params: EstimatorParams) -> Self {
        Self { params, model: None }
    }

    /// Fit against continuous targets.
    pub fn fit_values(&mut self, x: ArrayView2<'_, f64>, y: &[f64]) -> Result<()> {
        let n = x.nrows();
        if n != y.len() {
            return Err(Error::ShapeMismatch { expected: vec![n], actual: vec![y.len()] });
        }
        if n == 0 {
            return Err(Error::data_msg("cannot fit SVR on zero trials"));
        }

        let upper = self.params.c;
        let eps = self.params.epsilon;
        let qd = diagonal(x);
        let mut beta = vec![0.0; n];
        let mut model = LinearModel::zeros(x.ncols());
        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut initial_violation = None;

        for _ in 0..self.params.max_iter {
            order.shuffle(&mut rng);
            let mut violation = 0.0;

            for &i in &order {
                let row = x.row(i);
                let g = model.decision(row) - y[i];
                let (gp, gn) = (g + eps, g - eps);
                let h = qd[i];
                let b = beta[i];

                violation += if b == 0.0 {
                    (-gp).max(gn).max(0.0)
                } else if b >= upper {
                    gp.max(0.0)
                } else if b <= -upper {
                    (-gn).max(0.0)
                } else if b > 0.0 {
                    gp.abs()
                } else {
                    gn.abs()
                };

                let d = if gp < h * b {
                    -gp / h
                } else if gn > h * b {
                    -gn / h
                } else {
                    -b
                };
                let updated = (b + d).clamp(-upper, upper);
                let d = updated - b;
                if d.abs() > 1e-12 {
                    beta[i] = updated;
                    model.step(d, row);
                }
            }

            let init = *initial_violation.get_or_insert(violation);
            if violation <= self.params.tol * init.max(f64::EPSILON) {
                break;
            }
        }

        self.model = Some(model);
        Ok(())
    }

    fn fitted(&self) -> Result<&LinearModel> {
        self.model.as_ref().ok_or_else(|| Error::data_msg("LinearSvr used before fit"))
    }
}

impl Estimator for LinearSvr {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &Target) -> Result<()> {
        self.fit_values(x, &y.values())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let model = self.fitted()?;
        let n = x.nrows();
        model
            .decision_function(x)
            .into_shape_with_order((n, 1))
            .map_err(|e| Error::data_msg(e.to_string()))
    }

    fn n_outputs(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "LinearSVR"
    }
}
