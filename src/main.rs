//! gatdecode CLI
//!
//! # Usage
//!
//! ```bash
//! # List the built-in analyses
//! gatdecode analyses --subscores
//!
//! # Validate a run file
//! gatdecode validate run.yaml
//!
//! # Decode synthetic orientation data
//! gatdecode simulate --subjects 4 --trials 120 --output summary.json
//! ```

use clap::Parser;
use gatdecode::cli::{run_command, Cli, LogLevel};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let directive = LogLevel::from_flags(cli.quiet, cli.verbose).tracing_directive();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
