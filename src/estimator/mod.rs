//! Estimator factory
//!
//! Turns an [`AnalysisSpec`] into a fit-ready pipeline:
//!
//! - `categorize`: standard scaling + probability-calibrated linear SVC
//! - `regress`: standard scaling + linear SVR
//! - `circ_regress`: two scaled SVR pipelines on `cos(2θ)` and `sin(2θ)`
//!
//! The paired scorer comes from [`Scorer::for_decoding`](crate::scoring::Scorer::for_decoding).

mod circular;
mod pipeline;
mod platt;
mod scaler;
mod svc;
mod svr;
mod target;

pub use circular::CircularRegressor;
pub use pipeline::Pipeline;
pub use platt::PlattSigmoid;
pub use scaler::StandardScaler;
pub use svc::LinearSvc;
pub use svr::LinearSvr;
pub use target::Target;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisSpec, DecodingType};
use crate::error::Result;

/// A model fitted on (trial × feature) data.
pub trait Estimator: Send {
    /// Fit on training trials.
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &Target) -> Result<()>;

    /// Predict one row of outputs per trial.
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>>;

    /// Width of the output axis once fitted.
    fn n_outputs(&self) -> usize;

    /// Short model name for logs.
    fn name(&self) -> &'static str;
}

/// Solver settings shared by the linear models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    /// Inverse regularization strength
    pub c: f64,
    /// Width of the SVR insensitive tube
    pub epsilon: f64,
    /// Relative stopping tolerance
    pub tol: f64,
    /// Maximum passes over the training trials
    pub max_iter: usize,
    /// Seed for the coordinate visiting order
    pub seed: u64,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self { c: 1.0, epsilon: 0.0, tol: 1e-3, max_iter: 1000, seed: 0 }
    }
}

/// Build the unfitted estimator for an analysis.
pub fn build_estimator(spec: &AnalysisSpec, params: &EstimatorParams) -> Result<Box<dyn Estimator>> {
    spec.validate()?;
    Ok(for_decoding(spec.decoding(), params))
}

pub(crate) fn for_decoding(decoding: DecodingType, params: &EstimatorParams) -> Box<dyn Estimator> {
    match decoding {
        DecodingType::Categorize => Box::new(Pipeline::new(Box::new(LinearSvc::new(params.clone())))),
        DecodingType::Regress => Box::new(Pipeline::new(Box::new(LinearSvr::new(params.clone())))),
        DecodingType::CircularRegress { .. } => Box::new(CircularRegressor::new(params.clone())),
    }
}
