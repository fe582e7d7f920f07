//! # gatdecode
//!
//! Cross-validated temporal generalization ("generalization across time")
//! decoding of brain-signal epochs, with circular decoding of stimulus
//! orientation.
//!
//! An estimator trained at one time sample is tested at every time sample,
//! giving a train-time by test-time matrix of scores per analysis.
//! Orientation targets are decoded as doubled-angle (cos, sin) pairs and
//! recombined into angles, whose errors are summarized as tuning curves.
//!
//! ## Modules
//!
//! - [`data`]: epoch features, trial metadata and the trial filter language
//! - [`config`]: analysis catalogue, subscores, contrasts and YAML run files
//! - [`estimator`]: scaler plus linear SVR/SVC pipelines and the circular regressor
//! - [`engine`]: fold planning and the parallel generalization run
//! - [`scoring`]: AUC, Spearman and circular-linear correlation
//! - [`circular`]: doubled-angle codec
//! - [`tuning`]: realignment, error histograms and cross-subject aggregation
//! - [`pipeline`]: per-subject analysis runs and group summaries
//!
//! ## Example
//!
//! ```no_run
//! use gatdecode::config::find_analysis;
//! use gatdecode::data::SyntheticOrientation;
//! use gatdecode::engine::GatConfig;
//! use gatdecode::pipeline::run_analysis;
//!
//! let epochs = SyntheticOrientation::default().generate()?;
//! let spec = find_analysis("target_circAngle")?;
//! let record = run_analysis("s01", &spec, &epochs, None, &GatConfig::default())?;
//! println!("{:?}", record.scores.dim());
//! # Ok::<(), gatdecode::Error>(())
//! ```

pub mod circular;
pub mod cli;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod pipeline;
pub mod scoring;
pub mod tuning;

pub use config::{AnalysisSpec, DecodingType, RunConfig, ScoringPlan};
pub use data::EpochFeatures;
pub use engine::{GatConfig, GatOutput, GeneralizationRun, PredictionTensor};
pub use error::{Error, Result, RunContext};
pub use estimator::{Estimator, EstimatorParams};
