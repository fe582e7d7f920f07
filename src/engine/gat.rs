//! Cross-validated temporal generalization
//!
//! For every training time and fold, a fresh estimator is fit on the
//! training trials at that time and asked to predict the held-out trials
//! at every testing time. Work items `(train_time, fold)` are independent
//! and may run on a thread pool; their outputs are written back by index,
//! so the assembled tensor does not depend on scheduling.

use ndarray::{s, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::folds::{FoldPlan, KFold, StratifiedKFold};
use super::tensor::PredictionTensor;
use crate::config::{AnalysisSpec, DecodingType, ScoringPlan};
use crate::data::EpochFeatures;
use crate::error::{Error, Result, RunContext};
use crate::estimator::{self, EstimatorParams, Target};
use crate::scoring::Scorer;

/// Engine settings passed explicitly to every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatConfig {
    /// Worker threads (0 = all cores)
    pub n_jobs: usize,
    /// Seed for fold planning
    pub seed: u64,
    /// Solver settings for the per-item estimators
    pub estimator: EstimatorParams,
}

impl Default for GatConfig {
    fn default() -> Self {
        Self { n_jobs: 0, seed: 42, estimator: EstimatorParams::default() }
    }
}

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Configured,
    Fitting,
    Scoring,
    Complete,
    Aborted,
}

/// Everything a run produces.
#[derive(Debug, Clone, Serialize)]
pub struct GatOutput {
    /// Out-of-fold predictions
    pub predictions: PredictionTensor,
    /// Score per (train time, test time)
    pub scores: Array2<f64>,
    /// Auxiliary error function per cell, for decoding types that define one
    pub errors: Option<Array2<f64>>,
    /// Fold of each trial
    pub folds: Vec<usize>,
}

/// Predictions of one `(train_time, fold)` work item.
struct WorkOutput {
    train_time: usize,
    test: Vec<usize>,
    per_test_time: Vec<Array2<f64>>,
}

/// One temporal generalization run over a single analysis.
pub struct GeneralizationRun<'a> {
    spec: &'a AnalysisSpec,
    config: &'a GatConfig,
    state: RunState,
}

impl<'a> GeneralizationRun<'a> {
    /// Validate the analysis and prepare a run.
    pub fn new(spec: &'a AnalysisSpec, config: &'a GatConfig) -> Result<Self> {
        spec.validate()?;
        Ok(Self { spec, config, state: RunState::Configured })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Plan folds once for the whole run.
    pub fn plan_folds(&self, target: &Target) -> Result<FoldPlan> {
        let k = self.spec.cv_folds();
        let plan = match (self.spec.decoding().stratified(), target.labels()) {
            (true, Some(labels)) => StratifiedKFold::new(k).with_seed(self.config.seed).plan(labels),
            _ => KFold::new(k).with_seed(self.config.seed).plan(target.len()),
        };
        plan.map_err(|e| match e {
            Error::Configuration { message, .. } => Error::config(self.spec.name(), message),
            other => other,
        })
    }

    /// Fit, predict and score. Any failure leaves the run `Aborted`.
    pub fn run(&mut self, epochs: &EpochFeatures, target: &Target) -> Result<GatOutput> {
        let result = self.run_inner(epochs, target);
        self.state = if result.is_ok() { RunState::Complete } else { RunState::Aborted };
        result
    }

    fn run_inner(&mut self, epochs: &EpochFeatures, target: &Target) -> Result<GatOutput> {
        if epochs.n_trials() != target.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![epochs.n_trials()],
                actual: vec![target.len()],
            });
        }
        let plan = self.plan_folds(target)?;

        self.state = RunState::Fitting;
        let predictions = self.fit_predict(epochs, target, &plan)?;

        self.state = RunState::Scoring;
        let (scores, errors) = score_tensor(self.spec, &predictions, target, &plan)?;

        Ok(GatOutput { predictions, scores, errors, folds: plan.assignment().to_vec() })
    }

    /// Fill the prediction tensor from every `(train_time, fold)` work item.
    pub fn fit_predict(
        &self,
        epochs: &EpochFeatures,
        target: &Target,
        plan: &FoldPlan,
    ) -> Result<PredictionTensor> {
        let n_times = epochs.n_times();
        let n_outputs = output_width(self.spec.decoding(), target);
        let items: Vec<(usize, usize)> = (0..n_times)
            .flat_map(|t| (0..plan.n_folds()).map(move |k| (t, k)))
            .collect();

        let outputs = self.execute(&items, |t, k| self.fit_item(epochs, target, plan, t, k))?;

        let mut tensor = PredictionTensor::zeros(n_times, n_times, epochs.n_trials(), n_outputs);
        for out in outputs {
            for (test_time, preds) in out.per_test_time.iter().enumerate() {
                if preds.ncols() != n_outputs {
                    return Err(Error::ShapeMismatch {
                        expected: vec![out.test.len(), n_outputs],
                        actual: preds.shape().to_vec(),
                    });
                }
                for (row, &trial) in out.test.iter().enumerate() {
                    tensor.trial_mut(out.train_time, test_time, trial).assign(&preds.row(row));
                }
            }
        }
        Ok(tensor)
    }

    fn fit_item(
        &self,
        epochs: &EpochFeatures,
        target: &Target,
        plan: &FoldPlan,
        train_time: usize,
        fold: usize,
    ) -> Result<WorkOutput> {
        let context = || RunContext::analysis(self.spec.name()).at_time(train_time).in_fold(fold);
        let train = plan.train_indices(fold);
        let test = plan.test_indices(fold);

        if self.spec.decoding() == DecodingType::Categorize && target.distinct_labels(&train) < 2 {
            return Err(Error::data(context(), "training trials hold fewer than 2 distinct labels"));
        }

        let x_train = epochs.at_time(train_time).select(Axis(0), &train);
        let y_train = target.subset(&train);
        let mut model = estimator::for_decoding(self.spec.decoding(), &self.config.estimator);
        model
            .fit(x_train.view(), &y_train)
            .map_err(|e| e.with_context(context()))?;
        tracing::debug!(
            analysis = self.spec.name(),
            train_time,
            fold,
            n_train = train.len(),
            "fitted {}",
            model.name()
        );

        let per_test_time = (0..epochs.n_times())
            .map(|test_time| {
                let x_test = epochs.at_time(test_time).select(Axis(0), &test);
                model.predict(x_test.view()).map_err(|e| e.with_context(context()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(WorkOutput { train_time, test, per_test_time })
    }

    #[cfg(feature = "parallel")]
    fn execute<F>(&self, items: &[(usize, usize)], work: F) -> Result<Vec<WorkOutput>>
    where
        F: Fn(usize, usize) -> Result<WorkOutput> + Sync + Send,
    {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.n_jobs)
            .build()
            .map_err(|e| Error::config(self.spec.name(), format!("cannot start thread pool: {e}")))?;
        pool.install(|| items.par_iter().map(|&(t, k)| work(t, k)).collect())
    }

    #[cfg(not(feature = "parallel"))]
    fn execute<F>(&self, items: &[(usize, usize)], work: F) -> Result<Vec<WorkOutput>>
    where
        F: Fn(usize, usize) -> Result<WorkOutput>,
    {
        items.iter().map(|&(t, k)| work(t, k)).collect()
    }
}

fn output_width(decoding: DecodingType, target: &Target) -> usize {
    match decoding {
        DecodingType::Categorize => target.n_classes().unwrap_or(2),
        DecodingType::Regress => 1,
        DecodingType::CircularRegress { .. } => 2,
    }
}

/// Score every (train, test) cell, plus the auxiliary error function if any.
pub fn score_tensor(
    spec: &AnalysisSpec,
    predictions: &PredictionTensor,
    target: &Target,
    plan: &FoldPlan,
) -> Result<(Array2<f64>, Option<Array2<f64>>)> {
    let single_trial = spec.single_trial();
    let matrix = |scorer: Scorer| -> Result<Array2<f64>> {
        let (n_train, n_test) = (predictions.n_train_times(), predictions.n_test_times());
        let mut out = Array2::zeros((n_train, n_test));
        for t in 0..n_train {
            for u in 0..n_test {
                let cell = predictions.cell(t, u);
                let score = if single_trial {
                    scorer.score(cell, target)
                } else {
                    fold_average(scorer, cell, target, plan)
                };
                let context = RunContext::analysis(spec.name()).at_time(t);
                out[[t, u]] = score.map_err(|e| e.with_context(context))?;
            }
        }
        Ok(out)
    };

    match spec.scoring() {
        ScoringPlan::Score(scorer) => Ok((matrix(scorer)?, None)),
        ScoringPlan::ScoreWithError { scorer, error_function } => {
            let scores = matrix(scorer)?;
            let errors = if error_function == scorer { scores.clone() } else { matrix(error_function)? };
            Ok((scores, Some(errors)))
        }
    }
}

/// Mean of per-fold scores. Folds whose held-out trials contain a single
/// class cannot be scored by rank statistics and are left out.
fn fold_average(scorer: Scorer, cell: ArrayView2<'_, f64>, target: &Target, plan: &FoldPlan) -> Result<f64> {
    let mut scores = Vec::with_capacity(plan.n_folds());
    for fold in 0..plan.n_folds() {
        let test = plan.test_indices(fold);
        if target.labels().is_some() && target.distinct_labels(&test) < 2 {
            tracing::debug!(fold, "held-out trials hold a single class, fold not scored");
            continue;
        }
        let rows = cell.select(Axis(0), &test);
        let score = scorer
            .score(rows.view(), &target.subset(&test))
            .map_err(|e| e.with_context(RunContext::default().in_fold(fold)))?;
        scores.push(score);
    }
    if scores.is_empty() {
        return Err(Error::data_msg("no fold could be scored"));
    }
    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Generalization scores along the diagonal (train time = test time).
pub fn diagonal_scores(scores: &Array2<f64>) -> Vec<f64> {
    let n = scores.nrows().min(scores.ncols());
    (0..n).map(|t| scores[[t, t]]).collect()
}

/// Scores at one training time across all testing times.
pub fn generalization_row(scores: &Array2<f64>, train_time: usize) -> Vec<f64> {
    scores.slice(s![train_time, ..]).to_vec()
}
