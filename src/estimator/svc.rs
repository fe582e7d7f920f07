//! Linear support-vector classification with probability outputs
//!
//! Binary problems are solved by dual coordinate descent on the hinge
//! loss with class-balanced box constraints. Probabilities come from a
//! Platt sigmoid fitted on the training decision values. More than two
//! classes are handled one-vs-rest and renormalized.

use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::platt::PlattSigmoid;
use super::svr::{diagonal, LinearModel};
use super::{Estimator, EstimatorParams, Target};
use crate::error::{Error, Result};

/// One binary separator with its calibration.
#[derive(Clone, Debug)]
struct CalibratedSeparator {
    model: LinearModel,
    sigmoid: PlattSigmoid,
}

/// Probabilistic linear SVC.
#[derive(Clone, Debug)]
pub struct LinearSvc {
    params: EstimatorParams,
    n_classes: usize,
    separators: Vec<CalibratedSeparator>,
}

impl LinearSvc {
    /// Unfitted classifier.
    pub fn new(params: EstimatorParams) -> Self {
        Self { params, n_classes: 0, separators: Vec::new() }
    }

    /// Fit on class indices in `0..n_classes`.
    pub fn fit_labels(&mut self, x: ArrayView2<'_, f64>, labels: &[usize], n_classes: usize) -> Result<()> {
        if x.nrows() != labels.len() {
            return Err(Error::ShapeMismatch { expected: vec![x.nrows()], actual: vec![labels.len()] });
        }
        if n_classes < 2 {
            return Err(Error::data_msg(format!("classifier needs at least 2 classes, got {n_classes}")));
        }

        let problems: Vec<usize> = if n_classes == 2 { vec![1] } else { (0..n_classes).collect() };
        let qd = diagonal(x);
        self.separators = problems
            .into_iter()
            .map(|positive_class| {
                let positive: Vec<bool> = labels.iter().map(|&l| l == positive_class).collect();
                let model = self.solve_binary(x, &positive, &qd);
                let decision = model.decision_function(x).to_vec();
                let sigmoid = PlattSigmoid::fit(&decision, &positive);
                CalibratedSeparator { model, sigmoid }
            })
            .collect();
        self.n_classes = n_classes;
        Ok(())
    }

    /// Class-balanced dual coordinate descent for one binary problem.
    fn solve_binary(&self, x: ArrayView2<'_, f64>, positive: &[bool], qd: &[f64]) -> LinearModel {
        let n = positive.len();
        let n_pos = positive.iter().filter(|p| **p).count();
        let upper_for = |count: usize| {
            if count == 0 {
                self.params.c
            } else {
                self.params.c * n as f64 / (2.0 * count as f64)
            }
        };
        let (upper_pos, upper_neg) = (upper_for(n_pos), upper_for(n - n_pos));

        let mut alpha = vec![0.0; n];
        let mut model = LinearModel::zeros(x.ncols());
        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.params.seed);

        for _ in 0..self.params.max_iter {
            order.shuffle(&mut rng);
            let (mut pg_max, mut pg_min) = (f64::NEG_INFINITY, f64::INFINITY);

            for &i in &order {
                let row = x.row(i);
                let (y, upper) = if positive[i] { (1.0, upper_pos) } else { (-1.0, upper_neg) };
                let g = y * model.decision(row) - 1.0;
                let pg = if alpha[i] == 0.0 {
                    g.min(0.0)
                } else if alpha[i] >= upper {
                    g.max(0.0)
                } else {
                    g
                };
                pg_max = pg_max.max(pg);
                pg_min = pg_min.min(pg);

                if pg.abs() > 1e-12 {
                    let old = alpha[i];
                    alpha[i] = (old - g / qd[i]).clamp(0.0, upper);
                    model.step((alpha[i] - old) * y, row);
                }
            }

            if pg_max - pg_min <= self.params.tol {
                break;
            }
        }
        model
    }

    /// Class probabilities, one row per trial.
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if self.separators.is_empty() {
            return Err(Error::data_msg("LinearSvc used before fit"));
        }
        let n = x.nrows();
        let mut probas = Array2::zeros((n, self.n_classes));

        if self.n_classes == 2 {
            let sep = &self.separators[0];
            for (i, f) in sep.model.decision_function(x).iter().enumerate() {
                let p = sep.sigmoid.probability(*f);
                probas[[i, 0]] = 1.0 - p;
                probas[[i, 1]] = p;
            }
            return Ok(probas);
        }

        for (k, sep) in self.separators.iter().enumerate() {
            for (i, f) in sep.model.decision_function(x).iter().enumerate() {
                probas[[i, k]] = sep.sigmoid.probability(*f);
            }
        }
        for mut row in probas.rows_mut() {
            let total = row.sum();
            if total > 0.0 {
                row /= total;
            } else {
                row.fill(1.0 / self.n_classes as f64);
            }
        }
        Ok(probas)
    }
}

impl Estimator for LinearSvc {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &Target) -> Result<()> {
        match (y.labels(), y.n_classes()) {
            (Some(labels), Some(n_classes)) => self.fit_labels(x, labels, n_classes),
            _ => Err(Error::data_msg("LinearSvc needs a categorical target")),
        }
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.predict_proba(x)
    }

    fn n_outputs(&self) -> usize {
        self.n_classes
    }

    fn name(&self) -> &'static str {
        "LinearSVC"
    }
}
