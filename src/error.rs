//! Error types for decoding runs.
//!
//! Configuration and data errors abort the single affected analysis and carry
//! enough context (analysis name, train time, fold) to reproduce the failure.
//! Constant inputs to correlation scorers are not errors: they resolve to a
//! documented sentinel score inside the scorer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gatdecode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Where in a generalization run a data error happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Analysis name
    pub analysis: Option<String>,
    /// Training time index
    pub train_time: Option<usize>,
    /// Fold index
    pub fold: Option<usize>,
}

impl RunContext {
    /// Context naming only the analysis.
    pub fn analysis(name: impl Into<String>) -> Self {
        Self { analysis: Some(name.into()), ..Self::default() }
    }

    /// Attach a train time.
    pub fn at_time(mut self, train_time: usize) -> Self {
        self.train_time = Some(train_time);
        self
    }

    /// Attach a fold index.
    pub fn in_fold(mut self, fold: usize) -> Self {
        self.fold = Some(fold);
        self
    }

    /// Keep fields already set, take the rest from `outer`.
    pub fn or(self, outer: RunContext) -> Self {
        Self {
            analysis: self.analysis.or(outer.analysis),
            train_time: self.train_time.or(outer.train_time),
            fold: self.fold.or(outer.fold),
        }
    }
}

impl std::fmt::Display for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(name) = &self.analysis {
            parts.push(format!("analysis '{name}'"));
        }
        if let Some(t) = self.train_time {
            parts.push(format!("train time {t}"));
        }
        if let Some(k) = self.fold {
            parts.push(format!("fold {k}"));
        }
        if parts.is_empty() {
            write!(f, "no context")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Errors raised while configuring or running a decoding analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or unrecognized analysis specification.
    #[error("Configuration error in '{analysis}': {message}")]
    Configuration { analysis: String, message: String },

    /// Input data cannot support the requested operation.
    #[error("Data error ({context}): {message}")]
    Data { context: RunContext, message: String },

    /// Two arrays that must agree in shape do not.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// Reading a configuration file failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML configuration could not be parsed.
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Configuration error for a named analysis.
    pub fn config(analysis: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration { analysis: analysis.into(), message: message.into() }
    }

    /// Data error with run context.
    pub fn data(context: RunContext, message: impl Into<String>) -> Self {
        Self::Data { context, message: message.into() }
    }

    /// Data error without run context.
    pub fn data_msg(message: impl Into<String>) -> Self {
        Self::Data { context: RunContext::default(), message: message.into() }
    }

    /// Attach run context to a data error. Other variants pass through
    /// unchanged, and context already on the error wins.
    pub fn with_context(self, context: RunContext) -> Self {
        match self {
            Self::Data { context: inner, message } => Self::Data { context: inner.or(context), message },
            other => other,
        }
    }

    /// Whether the error came from the analysis definition rather than the data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::Yaml(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_names_run_context() {
        let err = Error::data(
            RunContext::analysis("target_present").at_time(3).in_fold(1),
            "only one class in training fold",
        );
        let msg = err.to_string();
        assert!(msg.contains("target_present"));
        assert!(msg.contains("train time 3"));
        assert!(msg.contains("fold 1"));
    }

    #[test]
    fn test_configuration_error_is_classified() {
        assert!(Error::config("x", "bad").is_configuration());
        assert!(!Error::data_msg("empty").is_configuration());
    }

    #[test]
    fn test_with_context_fills_only_missing_fields() {
        let err = Error::data(RunContext::default().in_fold(2), "no fold could be scored")
            .with_context(RunContext::analysis("probe_tilt").at_time(4).in_fold(0));
        let msg = err.to_string();
        assert_eq!(msg, "Data error (analysis 'probe_tilt', train time 4, fold 2): no fold could be scored");
        assert_eq!(msg.matches("Data error").count(), 1);
    }

    #[test]
    fn test_with_context_keeps_shape_mismatch() {
        let err = Error::ShapeMismatch { expected: vec![3], actual: vec![2] }
            .with_context(RunContext::analysis("x"));
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_empty_context_display() {
        assert_eq!(RunContext::default().to_string(), "no context");
    }
}
