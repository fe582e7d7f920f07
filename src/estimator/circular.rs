//! Orientation regression through the doubled-angle encoding
//!
//! Two independent scaled SVR pipelines are trained on `cos(2θ)` and
//! `sin(2θ)`. Predictions keep both raw components so the engine can
//! recombine them into angles and errors after the fact.

use ndarray::{concatenate, Array2, ArrayView2, Axis};

use super::pipeline::Pipeline;
use super::svr::LinearSvr;
use super::{Estimator, EstimatorParams, Target};
use crate::circular::encode;
use crate::error::{Error, Result};

/// Composite cos/sin regressor producing `(cos, sin)` per trial.
pub struct CircularRegressor {
    cos: Pipeline,
    sin: Pipeline,
}

impl CircularRegressor {
    pub fn new(params: EstimatorParams) -> Self {
        Self {
            cos: Pipeline::new(Box::new(LinearSvr::new(params.clone()))),
            sin: Pipeline::new(Box::new(LinearSvr::new(params))),
        }
    }
}

impl Estimator for CircularRegressor {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &Target) -> Result<()> {
        let angles = match y {
            Target::Angles(a) => a,
            _ => return Err(Error::data_msg("circular regression needs an angular target")),
        };
        let (cos, sin): (Vec<f64>, Vec<f64>) = angles
            .iter()
            .map(|&a| {
                let p = encode(a);
                (p.cos, p.sin)
            })
            .unzip();
        self.cos.fit(x, &Target::Values(cos))?;
        self.sin.fit(x, &Target::Values(sin))
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let cos = self.cos.predict(x)?;
        let sin = self.sin.predict(x)?;
        concatenate(Axis(1), &[cos.view(), sin.view()]).map_err(|e| Error::data_msg(e.to_string()))
    }

    fn n_outputs(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "CircularSVR"
    }
}
