//! Analysis specifications
//!
//! An analysis names what to decode (`condition`), which trials to use
//! (`query`) and how (`decoding`). Chance level, single-trial scoring and the
//! scorer all follow from the decoding type alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::scoring::Scorer;

/// Default number of cross-validation folds.
pub const DEFAULT_CV_FOLDS: usize = 8;

/// Default number of canonical orientation bins.
pub const DEFAULT_ANGLE_BINS: usize = 6;

/// How the target is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecodingType {
    /// Probability-calibrated linear classifier, scored by AUC
    Categorize,
    /// Linear support-vector regression, scored by Spearman correlation
    Regress,
    /// Paired cos/sin regressors on the doubled angle
    CircularRegress {
        /// Number of distinct orientation bins in the design
        n_angle_bins: usize,
    },
}

/// Scorer wiring for a decoding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPlan {
    /// Single score per (train, test) cell
    Score(Scorer),
    /// Score plus an auxiliary error function reported alongside
    ScoreWithError { scorer: Scorer, error_function: Scorer },
}

impl ScoringPlan {
    /// Primary scorer.
    pub fn scorer(&self) -> Scorer {
        match self {
            ScoringPlan::Score(s) | ScoringPlan::ScoreWithError { scorer: s, .. } => *s,
        }
    }
}

impl DecodingType {
    /// Circular regression over the default six orientation bins.
    pub fn circular() -> Self {
        DecodingType::CircularRegress { n_angle_bins: DEFAULT_ANGLE_BINS }
    }

    /// Expected score of an uninformative decoder.
    pub fn chance(&self) -> f64 {
        match self {
            DecodingType::Categorize => 0.5,
            DecodingType::Regress => 0.0,
            DecodingType::CircularRegress { n_angle_bins } => 1.0 / *n_angle_bins as f64,
        }
    }

    /// Whether scores need every trial's own out-of-fold prediction.
    pub fn single_trial(&self) -> bool {
        !matches!(self, DecodingType::Categorize)
    }

    /// Scorer (and error function) paired with this decoding type.
    pub fn scoring(&self) -> ScoringPlan {
        match self {
            DecodingType::Categorize => ScoringPlan::Score(Scorer::Auc),
            DecodingType::Regress => ScoringPlan::Score(Scorer::Spearman),
            DecodingType::CircularRegress { .. } => ScoringPlan::ScoreWithError {
                scorer: Scorer::CircularLinear,
                error_function: Scorer::CircularLinear,
            },
        }
    }

    /// Folds are stratified by label only for classification.
    pub fn stratified(&self) -> bool {
        matches!(self, DecodingType::Categorize)
    }

    /// Short name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodingType::Categorize => "categorize",
            DecodingType::Regress => "regress",
            DecodingType::CircularRegress { .. } => "circ_regress",
        }
    }
}

impl FromStr for DecodingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "categorize" => Ok(DecodingType::Categorize),
            "regress" => Ok(DecodingType::Regress),
            "circ_regress" | "circular_regress" => Ok(DecodingType::circular()),
            other => Err(Error::config(
                other,
                "unknown decoding type (expected categorize, regress or circ_regress)",
            )),
        }
    }
}

impl fmt::Display for DecodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoding analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSpec {
    name: String,
    contrast: String,
    condition: String,
    query: Option<String>,
    decoding: DecodingType,
    cv_folds: usize,
}

impl AnalysisSpec {
    /// New analysis; the condition defaults to the name.
    pub fn new(name: impl Into<String>, decoding: DecodingType) -> Self {
        let name = name.into();
        Self {
            contrast: name.clone(),
            condition: name.clone(),
            name,
            query: None,
            decoding,
            cv_folds: DEFAULT_CV_FOLDS,
        }
    }

    /// Decode a different metadata column than the analysis name.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Restrict trials with a filter predicate.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Number of cross-validation folds (validated by [`validate`](Self::validate)).
    pub fn with_cv_folds(mut self, folds: usize) -> Self {
        self.cv_folds = folds;
        self
    }

    /// Number of orientation bins; only affects circular analyses.
    pub fn with_angle_bins(mut self, n_angle_bins: usize) -> Self {
        if let DecodingType::CircularRegress { .. } = self.decoding {
            self.decoding = DecodingType::CircularRegress { n_angle_bins };
        }
        self
    }

    /// Check invariants that the constructors cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config("<unnamed>", "analysis name cannot be empty"));
        }
        if self.cv_folds < 2 {
            return Err(Error::config(
                &self.name,
                format!("cv_folds must be >= 2, got {}", self.cv_folds),
            ));
        }
        if let DecodingType::CircularRegress { n_angle_bins } = self.decoding {
            if n_angle_bins == 0 {
                return Err(Error::config(&self.name, "n_angle_bins must be > 0"));
            }
        }
        if let Some(q) = &self.query {
            crate::data::Predicate::parse(q).map_err(|e| Error::config(&self.name, e.to_string()))?;
        }
        Ok(())
    }

    /// Analysis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the base analysis this one derives from (itself for base analyses).
    pub fn contrast(&self) -> &str {
        &self.contrast
    }

    /// Metadata column holding the target.
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Trial filter.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Decoding type.
    pub fn decoding(&self) -> DecodingType {
        self.decoding
    }

    /// Cross-validation folds.
    pub fn cv_folds(&self) -> usize {
        self.cv_folds
    }

    /// Chance level, derived from the decoding type.
    pub fn chance(&self) -> f64 {
        self.decoding.chance()
    }

    /// Single-trial scoring, derived from the decoding type.
    pub fn single_trial(&self) -> bool {
        self.decoding.single_trial()
    }

    /// Scorer wiring, derived from the decoding type.
    pub fn scoring(&self) -> ScoringPlan {
        self.decoding.scoring()
    }

    pub(crate) fn derived(
        &self,
        name: String,
        query: Option<String>,
    ) -> Self {
        Self {
            name,
            contrast: self.contrast.clone(),
            condition: self.condition.clone(),
            query,
            decoding: self.decoding,
            cv_folds: self.cv_folds,
        }
    }
}

/// Analysis from string fields, as written in run files: `analysis("name", "categorize", None, None)`.
pub fn analysis(
    name: &str,
    decoding: &str,
    condition: Option<&str>,
    query: Option<&str>,
) -> Result<AnalysisSpec> {
    let decoding = decoding.parse::<DecodingType>().map_err(|_| {
        Error::config(name, format!("unknown decoding type '{decoding}'"))
    })?;
    let mut spec = AnalysisSpec::new(name, decoding);
    if let Some(c) = condition {
        spec = spec.with_condition(c);
    }
    if let Some(q) = query {
        spec = spec.with_query(q);
    }
    Ok(spec)
}
