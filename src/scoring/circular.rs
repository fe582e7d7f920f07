//! Circular scores for orientation decoding

use super::rank::pearson;
use crate::circular::recombine;

/// Circular-linear correlation between a linear variable and orientations.
///
/// Orientations (degrees, period 180°) are doubled before taking cosine and
/// sine, so θ and θ + 180° contribute identically. With
/// `r_xc = corr(x, cos 2θ)`, `r_xs = corr(x, sin 2θ)` and
/// `r_cs = corr(cos 2θ, sin 2θ)`:
///
/// ```text
/// R = sqrt((r_xc² + r_xs² - 2 r_xc r_xs r_cs) / (1 - r_cs²))
/// ```
///
/// Returns 0 for constant input or collinear components.
pub fn circular_linear_correlation(linear: &[f64], orientations_deg: &[f64]) -> f64 {
    let (cos, sin): (Vec<f64>, Vec<f64>) = orientations_deg
        .iter()
        .map(|a| {
            let rad = (2.0 * a).to_radians();
            (rad.cos(), rad.sin())
        })
        .unzip();

    let r_xc = pearson(linear, &cos);
    let r_xs = pearson(linear, &sin);
    let r_cs = pearson(&cos, &sin);
    let denom = 1.0 - r_cs * r_cs;
    if denom <= 1e-12 {
        return 0.0;
    }
    let r2 = (r_xc * r_xc + r_xs * r_xs - 2.0 * r_xc * r_xs * r_cs) / denom;
    r2.clamp(0.0, 1.0).sqrt()
}

/// Mean absolute signed circular error, in degrees.
pub fn mean_absolute_angle_error(predicted_deg: &[f64], truth_deg: &[f64]) -> f64 {
    let n = predicted_deg.len().min(truth_deg.len());
    if n == 0 {
        return 0.0;
    }
    predicted_deg
        .iter()
        .zip(truth_deg)
        .map(|(&p, &t)| {
            let pair = crate::circular::encode(p);
            recombine(pair.cos, pair.sin, t).1.abs()
        })
        .sum::<f64>()
        / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ANGLES: [f64; 6] = [15.0, 45.0, 75.0, 105.0, 135.0, 165.0];

    #[test]
    fn test_perfect_sinusoidal_dependence() {
        let x: Vec<f64> = ANGLES.iter().map(|&a| (2.0 * a).to_radians().sin()).collect();
        let r = circular_linear_correlation(&x, &ANGLES);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_half_turn_symmetry() {
        let x = [0.3, -1.0, 2.0, 0.5, 1.1, -0.7];
        let shifted: Vec<f64> = ANGLES.iter().map(|a| a + 180.0).collect();
        assert_abs_diff_eq!(
            circular_linear_correlation(&x, &ANGLES),
            circular_linear_correlation(&x, &shifted),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_linear_is_zero() {
        assert_eq!(circular_linear_correlation(&[2.0; 6], &ANGLES), 0.0);
    }

    #[test]
    fn test_bounded() {
        let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        let r = circular_linear_correlation(&x, &ANGLES);
        assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn test_mean_absolute_error_wraps() {
        assert_abs_diff_eq!(mean_absolute_angle_error(&[170.0, 10.0], &[10.0, 10.0]), 10.0);
        assert_eq!(mean_absolute_angle_error(&[], &[]), 0.0);
    }
}
