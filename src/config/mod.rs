//! Analysis and run configuration
//!
//! - `analysis`: one decoding analysis and its decoding type
//! - `subscore`: seen/unseen variants and their differences
//! - `contrast`: include/exclude trial recipes
//! - `catalog`: the built-in analyses and contrasts
//! - `schema` / `loader` / `validate`: YAML run configuration
//! - `cli`: command-line surface

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod contrast;
mod loader;
pub mod schema;
pub mod subscore;
pub mod validate;

pub use analysis::{analysis, AnalysisSpec, DecodingType, ScoringPlan, DEFAULT_ANGLE_BINS, DEFAULT_CV_FOLDS};
pub use cli::{AnalysesArgs, Cli, Command, OutputFormat, SimulateArgs, ValidateArgs};
pub use catalog::{default_analyses, find_analysis, find_contrast};
pub use contrast::{Contrast, ValueSet};
pub use loader::{load_config, resolve_analyses};
pub use schema::{AnalysisEntry, InlineAnalysis, RunConfig};
pub use subscore::{second_order, subscores, SubscoreDifference, SubscoreOverride};
pub use validate::{validate_config, ValidationError};
