//! One analysis on one subject

use ndarray::{Array2, Array3};
use serde::Serialize;
use tracing::{debug, info};

use crate::circular::HALF_TURN;
use crate::config::{AnalysisSpec, Contrast, DecodingType};
use crate::data::{filter_mask, EpochFeatures, MetadataTable};
use crate::engine::{GatConfig, GeneralizationRun, PredictionTensor};
use crate::error::{Error, Result, RunContext};
use crate::estimator::Target;
use crate::tuning::{classifier_errors, Readout};

/// Everything one run produced, ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct DecodingRecord {
    /// Subject identifier
    pub subject: String,
    /// Analysis that was run
    pub analysis: AnalysisSpec,
    /// Which of the subject's trials entered the analysis
    pub selection: Vec<bool>,
    /// Metadata rows of the selected trials
    pub metadata: MetadataTable,
    /// Target of the selected trials
    pub target: Target,
    /// Out-of-fold predictions
    pub predictions: PredictionTensor,
    /// Scores per (train time, test time)
    pub scores: Array2<f64>,
    /// Auxiliary error function per cell, if the decoding type defines one
    pub errors: Option<Array2<f64>>,
    /// Fold of each selected trial
    pub folds: Vec<usize>,
}

impl DecodingRecord {
    /// Number of trials that entered the analysis.
    pub fn n_trials(&self) -> usize {
        self.folds.len()
    }

    /// Whether this is a classifier whose classes are orientations, i.e.
    /// more than two classes all inside [0°, 180°).
    pub fn classifies_orientations(&self) -> bool {
        match (&self.target, self.analysis.decoding()) {
            (Target::Classes { classes, .. }, DecodingType::Categorize) => {
                classes.len() > 2 && classes.iter().all(|c| (0.0..HALF_TURN).contains(c))
            }
            _ => false,
        }
    }

    /// Signed angle errors `[train][test][trial]`.
    ///
    /// Circular analyses recombine their cos/sin predictions. Classifiers
    /// whose classes are orientations read an angle out of their
    /// probabilities.
    pub fn angle_errors(&self, readout: Readout) -> Result<Array3<f64>> {
        let context = || RunContext::analysis(self.analysis.name());
        match (&self.target, self.analysis.decoding()) {
            (Target::Angles(truth), DecodingType::CircularRegress { .. }) => {
                Ok(self.predictions.recombine(truth)?.1)
            }
            (Target::Classes { labels, classes }, DecodingType::Categorize) => {
                let truth: Vec<f64> = labels.iter().map(|&l| classes[l]).collect();
                let p = &self.predictions;
                let mut out = Array3::zeros((p.n_train_times(), p.n_test_times(), p.n_trials()));
                for t in 0..p.n_train_times() {
                    for u in 0..p.n_test_times() {
                        let errs = classifier_errors(p.cell(t, u), classes, &truth, readout)?;
                        for (i, e) in errs.into_iter().enumerate() {
                            out[[t, u, i]] = e;
                        }
                    }
                }
                Ok(out)
            }
            _ => Err(Error::data(context(), "regression predictions carry no orientation")),
        }
    }
}

/// Trials an analysis may use: its query, the optional contrast and a
/// present target value.
pub fn select_trials(spec: &AnalysisSpec, metadata: &MetadataTable, contrast: Option<&Contrast>) -> Result<Vec<bool>> {
    let mut mask = filter_mask(spec.query(), metadata)?;
    if let Some(c) = contrast {
        for (keep, inc) in mask.iter_mut().zip(c.select(metadata)?) {
            *keep &= inc;
        }
    }
    let values = metadata.numbers(spec.condition())?;
    let mut dropped = 0;
    for (keep, v) in mask.iter_mut().zip(&values) {
        if *keep && !v.is_finite() {
            *keep = false;
            dropped += 1;
        }
    }
    if dropped > 0 {
        debug!(analysis = spec.name(), dropped, "trials without a target value left out");
    }
    Ok(mask)
}

/// Run one analysis on one subject's epochs.
pub fn run_analysis(
    subject: &str,
    spec: &AnalysisSpec,
    epochs: &EpochFeatures,
    contrast: Option<&Contrast>,
    config: &GatConfig,
) -> Result<DecodingRecord> {
    let selection = select_trials(spec, epochs.metadata(), contrast)?;
    let indices: Vec<usize> = selection.iter().enumerate().filter(|(_, s)| **s).map(|(i, _)| i).collect();
    if indices.is_empty() {
        return Err(Error::data(RunContext::analysis(spec.name()), "no trials selected"));
    }

    let selected = epochs.select(&indices);
    let values = selected.metadata().numbers(spec.condition())?;
    let target = Target::from_values(spec.decoding(), &values)?;

    info!(
        subject,
        analysis = spec.name(),
        decoding = %spec.decoding(),
        n_trials = indices.len(),
        n_times = selected.n_times(),
        "running temporal generalization"
    );
    let mut run = GeneralizationRun::new(spec, config)?;
    let output = run.run(&selected, &target)?;

    Ok(DecodingRecord {
        subject: subject.to_string(),
        analysis: spec.clone(),
        selection,
        metadata: selected.metadata().clone(),
        target,
        predictions: output.predictions,
        scores: output.scores,
        errors: output.errors,
        folds: output.folds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{find_analysis, ValueSet};
    use crate::data::SyntheticOrientation;

    fn epochs() -> EpochFeatures {
        SyntheticOrientation { n_trials: 48, n_times: 2, onset: 0, grid_side: 4, ..Default::default() }
            .generate()
            .unwrap()
    }

    #[test]
    fn test_circular_record() {
        let spec = find_analysis("target_circAngle").unwrap().with_cv_folds(4);
        let record = run_analysis("s01", &spec, &epochs(), None, &GatConfig::default()).unwrap();
        assert_eq!(record.n_trials(), 48);
        assert_eq!(record.scores.dim(), (2, 2));
        let errors = record.angle_errors(Readout::WeightedMean).unwrap();
        assert_eq!(errors.dim(), (2, 2, 48));
        assert!(errors.iter().all(|e| *e > -90.0 && *e <= 90.0));
    }

    #[test]
    fn test_query_restricts_trials() {
        let spec = find_analysis("target_circAngle")
            .unwrap()
            .with_cv_folds(3)
            .with_query("response_visibilityCode >= 3");
        let record = run_analysis("s01", &spec, &epochs(), None, &GatConfig::default()).unwrap();
        assert_eq!(record.n_trials(), 24);
        assert_eq!(record.selection.iter().filter(|s| **s).count(), 24);
    }

    #[test]
    fn test_contrast_restricts_trials() {
        let contrast = Contrast {
            name: "oblique".into(),
            include: ValueSet::new("orientation_target", [45.0, 135.0]),
            exclude: vec![],
        };
        let spec = AnalysisSpec::new("orientation_target", DecodingType::Categorize).with_cv_folds(2);
        let record = run_analysis("s01", &spec, &epochs(), Some(&contrast), &GatConfig::default()).unwrap();
        assert_eq!(record.n_trials(), 16);
        assert_eq!(record.predictions.n_outputs(), 2);
        let errors = record.angle_errors(Readout::ArgMax).unwrap();
        assert!(errors.iter().all(|e| e.abs() < 1e-9 || (e.abs() - 90.0).abs() < 1e-9));
    }

    #[test]
    fn test_six_orientation_classifier_record() {
        let spec = AnalysisSpec::new("orientation_target", DecodingType::Categorize).with_cv_folds(4);
        let record = run_analysis("s01", &spec, &epochs(), None, &GatConfig::default()).unwrap();
        assert!(record.classifies_orientations());
        assert_eq!(record.predictions.n_outputs(), 6);
        assert_eq!(record.scores.dim(), (2, 2));
        assert!(record.scores.iter().all(|s| (0.0..=1.0).contains(s)));
        assert!(record.scores[[0, 0]] > spec.chance(), "auc = {}", record.scores[[0, 0]]);
    }

    #[test]
    fn test_binary_classifier_is_not_over_orientations() {
        let spec = AnalysisSpec::new("probe_tilt", DecodingType::Categorize).with_cv_folds(3);
        let record = run_analysis("s01", &spec, &epochs(), None, &GatConfig::default()).unwrap();
        assert!(!record.classifies_orientations());
    }

    #[test]
    fn test_empty_selection_is_data_error() {
        let spec = find_analysis("target_circAngle").unwrap().with_query("response_visibilityCode > 10");
        let err = run_analysis("s01", &spec, &epochs(), None, &GatConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Data { .. }));
        assert!(err.to_string().contains("target_circAngle"));
    }

    #[test]
    fn test_unknown_condition_is_data_error() {
        let spec = AnalysisSpec::new("no_such_column", DecodingType::Regress);
        assert!(run_analysis("s01", &spec, &epochs(), None, &GatConfig::default()).is_err());
    }

    #[test]
    fn test_regression_has_no_angles() {
        let spec = AnalysisSpec::new("probe_tilt", DecodingType::Regress).with_cv_folds(3);
        let record = run_analysis("s01", &spec, &epochs(), None, &GatConfig::default()).unwrap();
        assert!(record.angle_errors(Readout::ArgMax).is_err());
    }
}
