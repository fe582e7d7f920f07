//! Temporal generalization engine
//!
//! - `folds`: seeded (stratified) K-fold planning
//! - `gat`: fit at every train time, predict at every test time, score
//! - `tensor`: the `[train][test][trial][output]` prediction tensor

mod folds;
mod gat;
mod tensor;

pub use folds::{FoldPlan, KFold, StratifiedKFold};
pub use gat::{
    diagonal_scores, generalization_row, score_tensor, GatConfig, GatOutput, GeneralizationRun, RunState,
};
pub use tensor::PredictionTensor;
