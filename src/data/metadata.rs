//! Per-trial metadata table
//!
//! Column-oriented: one vector of values per named column, all of the same
//! length (the number of trials).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// A single metadata cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean flag (e.g. `detect_seen`)
    Bool(bool),
    /// Numeric value (codes, angles, contrasts)
    Number(f64),
    /// Free text
    Text(String),
    /// Missing entry
    Missing,
}

impl MetadataValue {
    /// Numeric view; booleans map to 0/1, missing and NaN to `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Number(v) if !v.is_nan() => Some(*v),
            MetadataValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Whether this cell carries no usable value.
    pub fn is_missing(&self) -> bool {
        match self {
            MetadataValue::Missing => true,
            MetadataValue::Number(v) => v.is_nan(),
            _ => false,
        }
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Number(v)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Number(v as f64)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Text(v.to_string())
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            MetadataValue::Number(v) => write!(f, "{v}"),
            MetadataValue::Text(s) => write!(f, "'{s}'"),
            MetadataValue::Missing => write!(f, "NaN"),
        }
    }
}

/// Trial metadata with named columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataTable {
    n_trials: usize,
    columns: BTreeMap<String, Vec<MetadataValue>>,
}

impl MetadataTable {
    /// Empty table for `n_trials` trials.
    pub fn new(n_trials: usize) -> Self {
        Self { n_trials, columns: BTreeMap::new() }
    }

    /// Add or replace a column. Fails if its length differs from the trial count.
    pub fn insert_column<V: Into<MetadataValue>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<()> {
        let name = name.into();
        let values: Vec<MetadataValue> = values.into_iter().map(Into::into).collect();
        if values.len() != self.n_trials {
            return Err(Error::data_msg(format!(
                "column '{name}' has {} values for {} trials",
                values.len(),
                self.n_trials
            )));
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Builder form of [`insert_column`](Self::insert_column).
    pub fn with_column<V: Into<MetadataValue>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Number of trials (rows).
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&[MetadataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column by name, failing with a data error when absent.
    pub fn require(&self, name: &str) -> Result<&[MetadataValue]> {
        self.column(name)
            .ok_or_else(|| Error::data_msg(format!("unknown metadata column '{name}'")))
    }

    /// Numeric view of a column; missing cells become NaN.
    pub fn numbers(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self
            .require(name)?
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect())
    }

    /// Rows at the given indices, in order.
    pub fn select(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                (name.clone(), indices.iter().map(|&i| values[i].clone()).collect())
            })
            .collect();
        Self { n_trials: indices.len(), columns }
    }
}
