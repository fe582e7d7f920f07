//! Circular codec for axis-symmetric orientations
//!
//! Orientations have period 180° (0° and 180° are the same bar), so angles
//! are doubled before taking cosine and sine. Regressors are fit on the two
//! components separately and their outputs are recombined through `atan2`.
//!
//! Conventions:
//! - decoded angles lie in [-90°, 90°)
//! - signed errors lie in (-90°, 90°]
//! - `decode(0, 0)` is 0°

use ndarray::{s, Array3, ArrayView4, Axis};

use crate::error::{Error, Result};

/// Period of an orientation in degrees.
pub const HALF_TURN: f64 = 180.0;

/// Cosine/sine pair on the doubled circle.
///
/// Predictions are regression outputs and need not have unit norm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularPair {
    /// cos(2θ)
    pub cos: f64,
    /// sin(2θ)
    pub sin: f64,
}

impl CircularPair {
    /// Pair from components.
    pub fn new(cos: f64, sin: f64) -> Self {
        Self { cos, sin }
    }

    /// Decode back into an orientation in degrees.
    pub fn angle(&self) -> f64 {
        decode(self.cos, self.sin)
    }
}

/// Map an orientation (degrees) onto the doubled circle.
pub fn encode(angle_deg: f64) -> CircularPair {
    let rad = (2.0 * angle_deg).to_radians();
    CircularPair { cos: rad.cos(), sin: rad.sin() }
}

/// Map a cosine/sine pair back onto an orientation in [-90°, 90°).
pub fn decode(cos: f64, sin: f64) -> f64 {
    if cos == 0.0 && sin == 0.0 {
        return 0.0;
    }
    wrap_half_open(sin.atan2(cos).to_degrees() / 2.0)
}

/// Shortest signed angular distance from `truth` to `predicted`, in (-90°, 90°].
pub fn signed_error(predicted_deg: f64, truth_deg: f64) -> f64 {
    let d = (predicted_deg - truth_deg).rem_euclid(HALF_TURN);
    if d > HALF_TURN / 2.0 {
        d - HALF_TURN
    } else {
        d
    }
}

/// Decode a predicted pair and measure its error against the true orientation.
///
/// Returns `(predicted_angle, signed_error)`. Every aggregator goes through
/// this function.
pub fn recombine(predicted_cos: f64, predicted_sin: f64, true_angle_deg: f64) -> (f64, f64) {
    let predicted = decode(predicted_cos, predicted_sin);
    (predicted, signed_error(predicted, true_angle_deg))
}

/// Reduce into [-90°, 90°).
fn wrap_half_open(angle_deg: f64) -> f64 {
    let wrapped = (angle_deg + HALF_TURN / 2.0).rem_euclid(HALF_TURN) - HALF_TURN / 2.0;
    // rem_euclid can round up to exactly HALF_TURN for tiny negative inputs
    if wrapped >= HALF_TURN / 2.0 {
        wrapped - HALF_TURN
    } else {
        wrapped
    }
}

/// Recombine separately predicted cosine and sine tensors.
///
/// Both tensors are `[train_time][test_time][trial]`. Returns the predicted
/// angles and signed errors with the same shape.
pub fn recombine_tensors(
    cos: &Array3<f64>,
    sin: &Array3<f64>,
    true_angles: &[f64],
) -> Result<(Array3<f64>, Array3<f64>)> {
    if cos.shape() != sin.shape() {
        return Err(Error::ShapeMismatch {
            expected: cos.shape().to_vec(),
            actual: sin.shape().to_vec(),
        });
    }
    if cos.len_of(Axis(2)) != true_angles.len() {
        return Err(Error::data_msg(format!(
            "{} true angles for {} predicted trials",
            true_angles.len(),
            cos.len_of(Axis(2))
        )));
    }

    let mut angles = Array3::zeros(cos.raw_dim());
    let mut errors = Array3::zeros(cos.raw_dim());
    for ((idx, &c), &s) in cos.indexed_iter().zip(sin.iter()) {
        let (angle, err) = recombine(c, s, true_angles[idx.2]);
        angles[idx] = angle;
        errors[idx] = err;
    }
    Ok((angles, errors))
}

/// Recombine a circular prediction tensor whose output axis holds `(cos, sin)`.
pub fn recombine_prediction(
    predictions: ArrayView4<'_, f64>,
    true_angles: &[f64],
) -> Result<(Array3<f64>, Array3<f64>)> {
    if predictions.len_of(Axis(3)) != 2 {
        return Err(Error::data_msg(format!(
            "circular predictions need 2 outputs (cos, sin), got {}",
            predictions.len_of(Axis(3))
        )));
    }
    let cos = predictions.slice(s![.., .., .., 0]).to_owned();
    let sin = predictions.slice(s![.., .., .., 1]).to_owned();
    recombine_tensors(&cos, &sin, true_angles)
}
