//! Synthetic orientation epochs
//!
//! Each of six orientations (15°, 45°, ..., 165°) drives a Gaussian
//! topography on a square sensor grid, centred at (cos 2θ, sin 2θ). From the
//! onset sample onwards every trial carries the topography of its
//! orientation on top of Gaussian noise scaled by `1 / snr`.

use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::epochs::EpochFeatures;
use super::metadata::MetadataTable;
use crate::error::{Error, Result};

/// Orientations used by the toy design, in degrees.
pub const TOY_ANGLES: [f64; 6] = [15.0, 45.0, 75.0, 105.0, 135.0, 165.0];

/// Generator settings.
#[derive(Clone, Debug)]
pub struct SyntheticOrientation {
    /// Number of trials (cycling through the orientations)
    pub n_trials: usize,
    /// Sensors per side of the grid
    pub grid_side: usize,
    /// Number of time samples
    pub n_times: usize,
    /// First sample carrying signal
    pub onset: usize,
    /// Signal-to-noise ratio
    pub snr: f64,
    /// Sampling rate in Hz
    pub sfreq: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for SyntheticOrientation {
    fn default() -> Self {
        Self { n_trials: 240, grid_side: 6, n_times: 30, onset: 15, snr: 10.0, sfreq: 100.0, seed: 42 }
    }
}

impl SyntheticOrientation {
    /// Generate epochs with metadata columns:
    ///
    /// - `target_circAngle`, `orientation_target`: orientation in degrees
    /// - `target_present`: always true
    /// - `response_visibilityCode`: 1..=4, cycling
    /// - `detect_seen`: visibility code above 1
    /// - `probe_tilt`: ±1, alternating
    pub fn generate(&self) -> Result<EpochFeatures> {
        if self.n_trials == 0 || self.grid_side == 0 || self.n_times == 0 {
            return Err(Error::config("synthetic", "trials, grid and times must be > 0"));
        }
        if self.snr <= 0.0 {
            return Err(Error::config("synthetic", "snr must be > 0"));
        }

        let n_chan = self.grid_side * self.grid_side;
        let topos: Vec<Vec<f64>> = TOY_ANGLES.iter().map(|&a| self.topography(a)).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut data = Array3::zeros((self.n_trials, n_chan, self.n_times));
        for ((trial, chan, t), v) in data.indexed_iter_mut() {
            *v = gaussian(&mut rng) / self.snr;
            if t >= self.onset {
                *v += topos[trial % TOY_ANGLES.len()][chan];
            }
        }

        let angles: Vec<f64> = (0..self.n_trials).map(|i| TOY_ANGLES[i % TOY_ANGLES.len()]).collect();
        let codes: Vec<f64> = (0..self.n_trials).map(|i| (i % 4 + 1) as f64).collect();
        let metadata = MetadataTable::new(self.n_trials)
            .with_column("target_circAngle", angles.clone())?
            .with_column("orientation_target", angles)?
            .with_column("target_present", vec![true; self.n_trials])?
            .with_column("detect_seen", codes.iter().map(|&c| c > 1.0).collect::<Vec<_>>())?
            .with_column("response_visibilityCode", codes)?
            .with_column(
                "probe_tilt",
                (0..self.n_trials).map(|i| if i % 2 == 0 { -1.0 } else { 1.0 }).collect::<Vec<_>>(),
            )?;

        let times = (0..self.n_times).map(|t| t as f64 / self.sfreq).collect();
        EpochFeatures::new(data, times, metadata)
    }

    fn topography(&self, angle_deg: f64) -> Vec<f64> {
        let side = self.grid_side;
        let axis: Vec<f64> = if side == 1 {
            vec![0.0]
        } else {
            (0..side).map(|i| 2.0 * i as f64 / (side - 1) as f64 - 1.0).collect()
        };
        let (dx, dy) = ((2.0 * angle_deg).to_radians().cos(), (2.0 * angle_deg).to_radians().sin());
        let mut topo = Vec::with_capacity(side * side);
        for &y in &axis {
            for &x in &axis {
                let (xm, ym) = (x + dx, y + dy);
                topo.push((-(xm * xm + ym * ym)).exp());
            }
        }
        topo
    }
}

/// Standard normal draw (Box-Muller).
pub(crate) fn gaussian(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-10);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_and_columns() {
        let gen = SyntheticOrientation { n_trials: 12, n_times: 4, onset: 2, ..Default::default() };
        let e = gen.generate().unwrap();
        assert_eq!(e.n_trials(), 12);
        assert_eq!(e.n_features(), 36);
        assert_eq!(e.n_times(), 4);
        let angles = e.metadata().numbers("target_circAngle").unwrap();
        assert_eq!(&angles[..6], &TOY_ANGLES);
        assert_eq!(angles[6], 15.0);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let gen = SyntheticOrientation { n_trials: 6, n_times: 2, ..Default::default() };
        assert_eq!(gen.generate().unwrap().data(), gen.generate().unwrap().data());
    }

    #[test]
    fn test_signal_only_after_onset() {
        let gen = SyntheticOrientation {
            n_trials: 6,
            n_times: 4,
            onset: 2,
            snr: 1e9,
            ..Default::default()
        };
        let e = gen.generate().unwrap();
        assert!(e.data().iter().step_by(4).all(|v| v.abs() < 1e-6));
        assert!(e.at_time(3).iter().any(|v| *v > 0.1));
    }

    #[test]
    fn test_invalid_settings() {
        let gen = SyntheticOrientation { snr: 0.0, ..Default::default() };
        assert!(gen.generate().is_err());
    }
}
