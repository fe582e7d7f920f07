//! YAML schema for decoding runs
//!
//! ```yaml
//! analyses:
//!   - target_circAngle
//!   - name: tilt
//!     type: categorize
//!     condition: probe_tilt
//!     query: "target_present == True"
//! cv_folds: 8
//! seed: 42
//! n_jobs: 0
//! reduction: median
//! ```

use serde::{Deserialize, Serialize};

use super::analysis::{DEFAULT_ANGLE_BINS, DEFAULT_CV_FOLDS};
use crate::estimator::EstimatorParams;
use crate::tuning::{Readout, Reduction};

/// Analysis given inline in a run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineAnalysis {
    /// Analysis name
    pub name: String,
    /// Decoding type (`categorize`, `regress`, `circ_regress`)
    #[serde(rename = "type")]
    pub decoding: String,
    /// Metadata column holding the target (defaults to the name)
    #[serde(default)]
    pub condition: Option<String>,
    /// Trial filter
    #[serde(default)]
    pub query: Option<String>,
}

/// Entry of the `analyses` list: a catalogue name or an inline definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisEntry {
    Named(String),
    Inline(InlineAnalysis),
}

impl AnalysisEntry {
    /// Name of the analysis this entry resolves to.
    pub fn name(&self) -> &str {
        match self {
            AnalysisEntry::Named(n) => n,
            AnalysisEntry::Inline(a) => &a.name,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Analyses to run; empty means the whole catalogue
    pub analyses: Vec<AnalysisEntry>,
    /// Add seen/unseen subscores of every analysis
    pub subscores: bool,
    /// Cross-validation folds for every analysis
    pub cv_folds: usize,
    /// Seed for fold planning
    pub seed: u64,
    /// Worker threads (0 = all cores)
    pub n_jobs: usize,
    /// Orientation bins of circular analyses (sets their chance level)
    pub n_angle_bins: usize,
    /// Bins of signed-error tuning curves
    pub tuning_bins: usize,
    /// Visibility codes summarized separately
    pub visibility_codes: Vec<f64>,
    /// Cross-subject reduction
    pub reduction: Reduction,
    /// Angle readout from classifier probabilities
    pub readout: Readout,
    /// Solver settings
    pub estimator: EstimatorParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            analyses: Vec::new(),
            subscores: false,
            cv_folds: DEFAULT_CV_FOLDS,
            seed: 42,
            n_jobs: 0,
            n_angle_bins: DEFAULT_ANGLE_BINS,
            tuning_bins: DEFAULT_ANGLE_BINS,
            visibility_codes: vec![1.0, 2.0, 3.0, 4.0],
            reduction: Reduction::Mean,
            readout: Readout::WeightedMean,
            estimator: EstimatorParams::default(),
        }
    }
}
