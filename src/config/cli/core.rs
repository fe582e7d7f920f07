//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::RunConfig;

/// gatdecode: temporal generalization decoding of brain-signal epochs
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gatdecode")]
#[command(version)]
#[command(about = "Cross-validated temporal generalization decoding with circular orientation targets")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the built-in analyses
    Analyses(AnalysesArgs),

    /// Validate a run configuration file
    Validate(ValidateArgs),

    /// Run analyses end to end on synthetic orientation data
    Simulate(SimulateArgs),
}

/// Arguments for the analyses command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AnalysesArgs {
    /// Include seen/unseen subscores
    #[arg(short, long)]
    pub subscores: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// List the resolved analyses
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the simulate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    /// Optional YAML configuration (defaults to a circular orientation analysis)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of simulated subjects
    #[arg(long, default_value_t = 1)]
    pub subjects: usize,

    /// Trials per subject
    #[arg(long, default_value_t = 60)]
    pub trials: usize,

    /// Time samples per trial
    #[arg(long, default_value_t = 10)]
    pub times: usize,

    /// First time sample carrying signal
    #[arg(long, default_value_t = 3)]
    pub onset: usize,

    /// Signal-to-noise ratio
    #[arg(long, default_value_t = 10.0)]
    pub snr: f64,

    /// Override number of folds
    #[arg(long)]
    pub folds: Option<usize>,

    /// Override worker threads
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Random seed for data generation and fold planning
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the group summary as JSON to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a RunConfig
pub fn apply_overrides(config: &mut RunConfig, args: &SimulateArgs) {
    if let Some(folds) = args.folds {
        config.cv_folds = folds;
    }
    if let Some(jobs) = args.jobs {
        config.n_jobs = jobs;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
}
