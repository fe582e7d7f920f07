//! Loading run configurations and resolving their analyses

use std::fs;
use std::path::Path;

use super::analysis::{analysis, AnalysisSpec};
use super::catalog::{default_analyses, find_analysis};
use super::schema::{AnalysisEntry, RunConfig};
use super::subscore::subscores;
use super::validate::validate_config;
use crate::engine::GatConfig;
use crate::error::{Error, Result};

impl RunConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        validate_config(&config).map_err(|e| Error::config("config", format!("Invalid config: {e}")))?;
        Ok(config)
    }

    /// Engine settings carried by this configuration.
    pub fn engine(&self) -> GatConfig {
        GatConfig { n_jobs: self.n_jobs, seed: self.seed, estimator: self.estimator.clone() }
    }
}

/// Load a run configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<RunConfig> {
    let path = config_path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    RunConfig::from_yaml_str(&yaml)
}

/// Analyses a configuration asks for, with run-wide settings applied.
///
/// An empty `analyses` list selects the whole catalogue. With `subscores`
/// set, every analysis is followed by its seen and unseen variants.
pub fn resolve_analyses(config: &RunConfig) -> Result<Vec<AnalysisSpec>> {
    let base = if config.analyses.is_empty() {
        default_analyses()
    } else {
        config
            .analyses
            .iter()
            .map(|entry| match entry {
                AnalysisEntry::Named(name) => find_analysis(name),
                AnalysisEntry::Inline(a) => {
                    analysis(&a.name, &a.decoding, a.condition.as_deref(), a.query.as_deref())
                }
            })
            .collect::<Result<Vec<_>>>()?
    };

    let base: Vec<AnalysisSpec> = base
        .into_iter()
        .map(|a| a.with_cv_folds(config.cv_folds).with_angle_bins(config.n_angle_bins))
        .collect();
    for a in &base {
        a.validate()?;
    }

    Ok(if config.subscores { subscores(&base) } else { base })
}
