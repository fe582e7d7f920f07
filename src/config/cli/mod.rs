//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! gatdecode analyses --subscores
//! gatdecode validate run.yaml --detailed
//! gatdecode simulate --trials 60 --times 10 --subjects 4
//! gatdecode simulate --config run.yaml --output summary.json
//! ```

mod core;
mod types;

pub use core::{
    apply_overrides, parse_args, AnalysesArgs, Cli, Command, SimulateArgs, ValidateArgs,
};
pub use types::OutputFormat;

#[cfg(test)]
mod tests;
