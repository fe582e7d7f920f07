//! Simulate command implementation
//!
//! Runs the configured analyses on synthetic orientation data for a number
//! of simulated subjects, then reduces orientation analyses (circular
//! regressors and classifiers over orientations) across subjects.

use std::collections::BTreeMap;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::apply_overrides;
use crate::config::{
    load_config, resolve_analyses, AnalysisEntry, DecodingType, OutputFormat, RunConfig, SimulateArgs,
};
use crate::data::SyntheticOrientation;
use crate::engine::diagonal_scores;
use crate::pipeline::{run_analysis, summarize_subject, GroupSummary, SubjectSummary, SummaryOptions};

/// Configuration used when none is given: one circular orientation analysis
pub fn default_simulation_config() -> RunConfig {
    RunConfig {
        analyses: vec![AnalysisEntry::Named("target_circAngle".to_string())],
        ..Default::default()
    }
}

/// Format a score vector compactly
pub fn format_scores(scores: &[f64]) -> String {
    scores.iter().map(|s| format!("{s:.3}")).collect::<Vec<_>>().join(" ")
}

pub fn run_simulate(args: SimulateArgs, level: LogLevel) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => load_config(path).map_err(|e| format!("Config error: {e}"))?,
        None => default_simulation_config(),
    };
    apply_overrides(&mut config, &args);
    let analyses = resolve_analyses(&config).map_err(|e| format!("Config error: {e}"))?;
    let engine = config.engine();
    let options = SummaryOptions {
        tuning_bins: config.tuning_bins,
        visibility_codes: config.visibility_codes.clone(),
        readout: config.readout,
    };

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Simulating {} subject(s) x {} trials x {} samples, {} analyses",
            args.subjects,
            args.trials,
            args.times,
            analyses.len()
        ),
    );

    let mut per_analysis: BTreeMap<String, Vec<SubjectSummary>> = BTreeMap::new();
    let mut completed = 0usize;

    for s in 0..args.subjects {
        let subject = format!("sim{:02}", s + 1);
        let epochs = SyntheticOrientation {
            n_trials: args.trials,
            n_times: args.times,
            onset: args.onset,
            snr: args.snr,
            seed: config.seed.wrapping_add(s as u64),
            ..Default::default()
        }
        .generate()
        .map_err(|e| format!("Synthetic data error: {e}"))?;

        for spec in &analyses {
            let record = match run_analysis(&subject, spec, &epochs, None, &engine) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(subject = %subject, analysis = spec.name(), "analysis aborted: {e}");
                    log(level, LogLevel::Verbose, &format!("  {subject} {}: skipped ({e})", spec.name()));
                    continue;
                }
            };
            completed += 1;

            let diag = diagonal_scores(&record.scores);
            log(
                level,
                LogLevel::Verbose,
                &format!("  {subject} {} diagonal: {}", spec.name(), format_scores(&diag)),
            );

            let orientation_analysis =
                matches!(spec.decoding(), DecodingType::CircularRegress { .. }) || record.classifies_orientations();
            if orientation_analysis {
                let summary = summarize_subject(&record, &options).map_err(|e| format!("Summary error: {e}"))?;
                per_analysis.entry(spec.name().to_string()).or_default().push(summary);
            }
        }
    }

    if completed == 0 {
        return Err("no analysis could be run on the synthetic data".to_string());
    }

    let groups = per_analysis
        .values()
        .map(|subjects| GroupSummary::from_subjects(subjects, config.reduction))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Summary error: {e}"))?;

    for group in &groups {
        if let Some(scores) = &group.diagonal_scores {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "{} (chance {:.3}, {} subjects): {}",
                    group.analysis,
                    group.chance,
                    group.n_subjects,
                    format_scores(&scores.to_vec())
                ),
            );
        }
    }

    if args.format == OutputFormat::Json || args.output.is_some() {
        let json = serde_json::to_string_pretty(&groups).map_err(|e| format!("JSON error: {e}"))?;
        match &args.output {
            Some(path) => {
                std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
                log(level, LogLevel::Normal, &format!("Summary written to {}", path.display()));
            }
            None => println!("{json}"),
        }
    }

    Ok(())
}
