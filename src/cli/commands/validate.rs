//! Validate command implementation

use super::analyses::format_analysis_row;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, resolve_analyses, AnalysisEntry, RunConfig, ValidateArgs};

/// Format run-wide settings as a string
pub fn format_run_info(config: &RunConfig) -> String {
    [
        format!("  CV folds: {}", config.cv_folds),
        format!("  Seed: {}", config.seed),
        format!(
            "  Workers: {}",
            if config.n_jobs == 0 { "all cores".to_string() } else { config.n_jobs.to_string() }
        ),
        format!("  Angle bins: {}", config.n_angle_bins),
        format!("  Tuning bins: {}", config.tuning_bins),
        format!("  Visibility codes: {:?}", config.visibility_codes),
        format!("  Reduction: {:?}", config.reduction),
    ]
    .join("\n")
}

/// Format solver settings as a string
pub fn format_estimator_info(config: &RunConfig) -> String {
    let p = &config.estimator;
    format!(
        "  C: {}\n  Epsilon: {}\n  Tolerance: {}\n  Max iterations: {}",
        p.c, p.epsilon, p.tol, p.max_iter
    )
}

/// Format the requested analyses as a string
pub fn format_requested(config: &RunConfig) -> String {
    if config.analyses.is_empty() {
        return "  (whole catalogue)".to_string();
    }
    config
        .analyses
        .iter()
        .map(|entry| match entry {
            AnalysisEntry::Named(n) => format!("  {n}"),
            AnalysisEntry::Inline(a) => format!("  {} (inline, {})", a.name, a.decoding),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let analyses = resolve_analyses(&config).map_err(|e| format!("Validation failed: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Configuration is valid ({} analyses)", analyses.len()),
    );

    if args.detailed {
        println!();
        println!("Configuration Summary:");
        println!("{}", format_run_info(&config));
        println!();
        println!("{}", format_estimator_info(&config));
        println!();
        println!("Requested:");
        println!("{}", format_requested(&config));
        println!();
        println!("Resolved:");
        for spec in &analyses {
            println!("{}", format_analysis_row(spec));
        }
    }

    Ok(())
}
