//! Per-subject and group summaries
//!
//! A subject summary holds same-time tuning curves of the signed angle
//! errors, overall and per visibility code, along with diagonal scores.
//! Group summaries reduce these across subjects; a visibility level a
//! subject never reported is left out of that level's reduction.

use ndarray::{s, Array1, Array2};
use serde::Serialize;

use super::run::DecodingRecord;
use crate::config::DecodingType;
use crate::engine::diagonal_scores;
use crate::error::{Error, Result};
use crate::estimator::Target;
use crate::tuning::{
    aggregate_across_subjects, build_tuning_curve, mean_realigned_diagonal, realign_tensor,
    subdivide_by_visibility, Readout, Reduction, Selection,
};

/// Metadata column holding the reported visibility.
pub const VISIBILITY_COLUMN: &str = "response_visibilityCode";

/// Summary settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    pub tuning_bins: usize,
    pub visibility_codes: Vec<f64>,
    pub readout: Readout,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self { tuning_bins: 6, visibility_codes: vec![1.0, 2.0, 3.0, 4.0], readout: Readout::WeightedMean }
    }
}

/// One subject, one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectSummary {
    pub subject: String,
    pub analysis: String,
    pub chance: f64,
    /// Score at train time = test time
    pub diagonal_scores: Array1<f64>,
    /// `[time][bin]` error proportions over all selected trials
    pub tuning: Array2<f64>,
    /// Per visibility code; `None` when the subject has no such trials
    pub tuning_by_visibility: Vec<(f64, Option<Array2<f64>>)>,
    /// `[time][bin]` mean realigned class probabilities, for classifiers over orientations
    pub probability_tuning: Option<Array2<f64>>,
    /// Realigned class probabilities per visibility code; empty for other decoders
    pub probability_tuning_by_visibility: Vec<(f64, Option<Array2<f64>>)>,
}

/// Same-time tuning curves `[time][bin]` of the given trials.
fn diagonal_tuning(errors: &ndarray::Array3<f64>, trials: &[usize], n_bins: usize) -> Result<Array2<f64>> {
    let n = errors.dim().0.min(errors.dim().1);
    let mut out = Array2::zeros((n, n_bins));
    for t in 0..n {
        let row = errors.slice(s![t, t, ..]);
        let picked: Vec<f64> = trials.iter().map(|&i| row[i]).collect();
        let curve = build_tuning_curve(&picked, n_bins)?;
        for (b, p) in curve.proportions().into_iter().enumerate() {
            out[[t, b]] = p;
        }
    }
    Ok(out)
}

/// Summarize one decoding record.
pub fn summarize_subject(record: &DecodingRecord, options: &SummaryOptions) -> Result<SubjectSummary> {
    let errors = record.angle_errors(options.readout)?;
    let all: Vec<usize> = (0..record.n_trials()).collect();
    let tuning = diagonal_tuning(&errors, &all, options.tuning_bins)?;

    let codes = record.metadata.numbers(VISIBILITY_COLUMN)?;
    let tuning_by_visibility = by_visibility(&codes, &options.visibility_codes, |trials| {
        diagonal_tuning(&errors, trials, options.tuning_bins)
    })?;

    let (probability_tuning, probability_tuning_by_visibility) =
        match (&record.target, record.analysis.decoding()) {
            (Target::Classes { labels, classes }, DecodingType::Categorize) => {
                let realigned = realign_tensor(&record.predictions, labels, classes.len() / 2)?;
                let per_level = by_visibility(&codes, &options.visibility_codes, |trials| {
                    mean_realigned_diagonal(&realigned, trials)
                })?;
                (Some(mean_realigned_diagonal(&realigned, &all)?), per_level)
            }
            _ => (None, Vec::new()),
        };

    Ok(SubjectSummary {
        subject: record.subject.clone(),
        analysis: record.analysis.name().to_string(),
        chance: record.analysis.chance(),
        diagonal_scores: Array1::from(diagonal_scores(&record.scores)),
        tuning,
        tuning_by_visibility,
        probability_tuning,
        probability_tuning_by_visibility,
    })
}

/// Apply `summarize` to the trials of each visibility code; `None` for codes
/// with no trials.
fn by_visibility<F>(codes: &[f64], levels: &[f64], summarize: F) -> Result<Vec<(f64, Option<Array2<f64>>)>>
where
    F: Fn(&[usize]) -> Result<Array2<f64>>,
{
    levels
        .iter()
        .map(|&code| match subdivide_by_visibility(codes, code) {
            Selection::Empty => Ok((code, None)),
            Selection::Trials { indices, .. } => Ok((code, Some(summarize(&indices)?))),
        })
        .collect()
}

/// Reduce per-visibility curves level by level across subjects.
fn reduce_by_visibility<F>(
    subjects: &[SubjectSummary],
    levels: &[(f64, Option<Array2<f64>>)],
    reduction: Reduction,
    field: F,
) -> Result<Vec<(f64, Option<Array2<f64>>)>>
where
    F: Fn(&SubjectSummary) -> &[(f64, Option<Array2<f64>>)],
{
    levels
        .iter()
        .enumerate()
        .map(|(level, (code, _))| {
            let per_subject: Vec<Option<Array2<f64>>> = subjects
                .iter()
                .map(|s| field(s).get(level).and_then(|(_, t)| t.clone()))
                .collect();
            Ok((*code, aggregate_across_subjects(&per_subject, reduction)?))
        })
        .collect()
}

/// Cross-subject reduction of one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub analysis: String,
    pub chance: f64,
    pub n_subjects: usize,
    pub reduction: Reduction,
    pub diagonal_scores: Option<Array1<f64>>,
    pub tuning: Option<Array2<f64>>,
    pub tuning_by_visibility: Vec<(f64, Option<Array2<f64>>)>,
    pub probability_tuning: Option<Array2<f64>>,
    pub probability_tuning_by_visibility: Vec<(f64, Option<Array2<f64>>)>,
}

impl GroupSummary {
    /// Reduce subject summaries of the same analysis.
    pub fn from_subjects(subjects: &[SubjectSummary], reduction: Reduction) -> Result<Self> {
        let first = subjects.first().ok_or_else(|| Error::data_msg("no subjects to summarize"))?;
        if let Some(other) = subjects.iter().find(|s| s.analysis != first.analysis) {
            return Err(Error::data_msg(format!(
                "cannot pool analyses '{}' and '{}'",
                first.analysis, other.analysis
            )));
        }

        let scores: Vec<_> = subjects.iter().map(|s| Some(s.diagonal_scores.clone())).collect();
        let tuning: Vec<_> = subjects.iter().map(|s| Some(s.tuning.clone())).collect();
        let probability: Vec<_> = subjects.iter().map(|s| s.probability_tuning.clone()).collect();

        let tuning_by_visibility = reduce_by_visibility(
            subjects,
            &first.tuning_by_visibility,
            reduction,
            |s| s.tuning_by_visibility.as_slice(),
        )?;
        let probability_tuning_by_visibility = reduce_by_visibility(
            subjects,
            &first.probability_tuning_by_visibility,
            reduction,
            |s| s.probability_tuning_by_visibility.as_slice(),
        )?;

        Ok(Self {
            analysis: first.analysis.clone(),
            chance: first.chance,
            n_subjects: subjects.len(),
            reduction,
            diagonal_scores: aggregate_across_subjects(&scores, reduction)?,
            tuning: aggregate_across_subjects(&tuning, reduction)?,
            tuning_by_visibility,
            probability_tuning: aggregate_across_subjects(&probability, reduction)?,
            probability_tuning_by_visibility,
        })
    }
}
