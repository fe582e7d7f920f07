//! Standardize-then-model composition

use ndarray::{Array2, ArrayView2};

use super::scaler::StandardScaler;
use super::{Estimator, Target};
use crate::error::Result;

/// A [`StandardScaler`] fitted on the training trials, followed by a model.
pub struct Pipeline {
    scaler: StandardScaler,
    model: Box<dyn Estimator>,
}

impl Pipeline {
    pub fn new(model: Box<dyn Estimator>) -> Self {
        Self { scaler: StandardScaler::new(), model }
    }
}

impl Estimator for Pipeline {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &Target) -> Result<()> {
        let z = self.scaler.fit_transform(x)?;
        self.model.fit(z.view(), y)
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let z = self.scaler.transform(x)?;
        self.model.predict(z.view())
    }

    fn n_outputs(&self) -> usize {
        self.model.n_outputs()
    }

    fn name(&self) -> &'static str {
        self.model.name()
    }
}
