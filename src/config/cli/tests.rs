//! Tests for CLI argument parsing

use super::*;
use crate::config::RunConfig;
use std::path::PathBuf;

#[test]
fn test_parse_validate_command() {
    let cli = parse_args(["gatdecode", "validate", "run.yaml", "--detailed"]).unwrap();
    match cli.command {
        Command::Validate(args) => {
            assert_eq!(args.config, PathBuf::from("run.yaml"));
            assert!(args.detailed);
        }
        _ => panic!("Expected Validate command"),
    }
}

#[test]
fn test_parse_simulate_defaults() {
    let cli = parse_args(["gatdecode", "simulate"]).unwrap();
    match cli.command {
        Command::Simulate(args) => {
            assert_eq!(args.trials, 60);
            assert_eq!(args.subjects, 1);
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.config.is_none());
        }
        _ => panic!("Expected Simulate command"),
    }
}

#[test]
fn test_parse_simulate_with_overrides() {
    let cli = parse_args([
        "gatdecode", "simulate", "--trials", "120", "--folds", "4", "-j", "2", "--seed", "7",
        "--format", "json",
    ])
    .unwrap();
    let Command::Simulate(args) = cli.command else {
        panic!("Expected Simulate command");
    };
    assert_eq!(args.trials, 120);
    assert_eq!(args.format, OutputFormat::Json);

    let mut config = RunConfig::default();
    apply_overrides(&mut config, &args);
    assert_eq!(config.cv_folds, 4);
    assert_eq!(config.n_jobs, 2);
    assert_eq!(config.seed, 7);
}

#[test]
fn test_global_flags() {
    let cli = parse_args(["gatdecode", "analyses", "--verbose"]).unwrap();
    assert!(cli.verbose);
    assert!(!cli.quiet);
    let cli = parse_args(["gatdecode", "-q", "analyses", "--subscores"]).unwrap();
    assert!(cli.quiet);
}

#[test]
fn test_invalid_format_rejected() {
    assert!(parse_args(["gatdecode", "analyses", "--format", "xml"]).is_err());
}

#[test]
fn test_unknown_command_rejected() {
    assert!(parse_args(["gatdecode", "train", "x.yaml"]).is_err());
}
