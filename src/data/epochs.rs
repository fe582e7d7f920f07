//! Epoch feature arrays
//!
//! Trials × features × time samples, held in memory for the whole run.
//! Features are sensors for evoked responses or band powers for
//! time-frequency input; the engine does not distinguish them.

use ndarray::{s, Array3, ArrayView2, Axis};

use super::metadata::MetadataTable;
use crate::error::{Error, Result};

/// Read-only epoch data plus trial metadata.
#[derive(Clone, Debug)]
pub struct EpochFeatures {
    data: Array3<f64>,
    times: Vec<f64>,
    metadata: MetadataTable,
}

impl EpochFeatures {
    /// Wrap a trial × feature × time array.
    ///
    /// `times` labels the time axis in seconds; its length and the metadata
    /// row count must match the array.
    pub fn new(data: Array3<f64>, times: Vec<f64>, metadata: MetadataTable) -> Result<Self> {
        let (n_trials, _, n_times) = data.dim();
        if times.len() != n_times {
            return Err(Error::ShapeMismatch { expected: vec![n_times], actual: vec![times.len()] });
        }
        if metadata.n_trials() != n_trials {
            return Err(Error::ShapeMismatch {
                expected: vec![n_trials],
                actual: vec![metadata.n_trials()],
            });
        }
        Ok(Self { data, times, metadata })
    }

    /// Number of trials.
    pub fn n_trials(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Number of features per time sample.
    pub fn n_features(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Number of time samples.
    pub fn n_times(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Time labels in seconds.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Trial metadata.
    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    /// Full data array.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// All trials at one time sample (trial × feature).
    pub fn at_time(&self, time: usize) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(2), time)
    }

    /// Subset of trials, in the given order.
    pub fn select(&self, trials: &[usize]) -> Self {
        Self {
            data: self.data.select(Axis(0), trials),
            times: self.times.clone(),
            metadata: self.metadata.select(trials),
        }
    }

    /// Keep samples with `tmin <= t <= tmax`.
    pub fn crop(&self, tmin: f64, tmax: f64) -> Result<Self> {
        let keep: Vec<usize> =
            (0..self.times.len()).filter(|&i| self.times[i] >= tmin && self.times[i] <= tmax).collect();
        if keep.is_empty() {
            return Err(Error::data_msg(format!("no time samples within [{tmin}, {tmax}]")));
        }
        Ok(Self {
            data: self.data.select(Axis(2), &keep),
            times: keep.iter().map(|&i| self.times[i]).collect(),
            metadata: self.metadata.clone(),
        })
    }

    /// Keep every `step`-th time sample.
    pub fn decimate(&self, step: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::config("preprocessing", "decimation step must be > 0"));
        }
        Ok(Self {
            data: self.data.slice(s![.., .., ..;step]).to_owned(),
            times: self.times.iter().step_by(step).copied().collect(),
            metadata: self.metadata.clone(),
        })
    }
}
