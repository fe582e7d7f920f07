//! Feature standardization

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Error, Result};

/// Zero-mean, unit-variance scaling fitted per feature.
///
/// Constant features keep a scale of 1 so they map to 0 instead of NaN.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn per-feature mean and standard deviation.
    pub fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<()> {
        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::data_msg("cannot fit scaler on zero trials"))?;
        let scale = x.std_axis(Axis(0), 0.0).mapv(|s| if s > f64::EPSILON { s } else { 1.0 });
        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(())
    }

    /// Apply the learned scaling.
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(m), Some(s)) => (m, s),
            _ => return Err(Error::data_msg("scaler used before fit")),
        };
        if x.ncols() != mean.len() {
            return Err(Error::ShapeMismatch { expected: vec![mean.len()], actual: vec![x.ncols()] });
        }
        Ok((&x - mean) / scale)
    }

    /// Fit then transform the same data.
    pub fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_standardizes_columns() {
        let x = array![[1.0, 5.0], [3.0, 5.0], [5.0, 5.0]];
        let mut scaler = StandardScaler::new();
        let z = scaler.fit_transform(x.view()).unwrap();
        assert_abs_diff_eq!(z.column(0).sum(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z[[2, 0]], (2.0f64 / (8.0f64 / 3.0).sqrt()), epsilon = 1e-12);
        // constant column maps to zero
        assert!(z.column(1).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let scaler = StandardScaler::new();
        assert!(scaler.transform(array![[1.0]].view()).is_err());
    }

    #[test]
    fn test_feature_count_checked() {
        let mut scaler = StandardScaler::new();
        scaler.fit(array![[1.0, 2.0]].view()).unwrap();
        assert!(scaler.transform(array![[1.0]].view()).is_err());
    }
}
