//! Named contrasts
//!
//! A contrast picks the trials a decoder may see: those whose `include`
//! column takes one of the listed values and that match none of the
//! `exclude` value sets. A NaN in a value list matches missing cells.

use serde::{Deserialize, Serialize};

use crate::data::{MetadataTable, MetadataValue};
use crate::error::Result;

const VALUE_TOLERANCE: f64 = 1e-9;

/// Column plus the values it may take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSet {
    /// Metadata column
    pub cond: String,
    /// Accepted values
    pub values: Vec<f64>,
}

impl ValueSet {
    /// New value set.
    pub fn new(cond: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self { cond: cond.into(), values: values.into() }
    }

    fn matches(&self, cell: &MetadataValue) -> bool {
        match cell.as_f64() {
            Some(v) => self.values.iter().any(|x| (x - v).abs() < VALUE_TOLERANCE),
            None => cell.is_missing() && self.values.iter().any(|x| x.is_nan()),
        }
    }

    /// Per-trial membership mask.
    pub fn mask(&self, table: &MetadataTable) -> Result<Vec<bool>> {
        Ok(table.require(&self.cond)?.iter().map(|c| self.matches(c)).collect())
    }
}

/// Feature/label extraction recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contrast {
    /// Contrast name
    pub name: String,
    /// Trials to keep
    pub include: ValueSet,
    /// Trials to drop
    #[serde(default)]
    pub exclude: Vec<ValueSet>,
}

impl Contrast {
    /// Selection mask over the table's trials.
    pub fn select(&self, table: &MetadataTable) -> Result<Vec<bool>> {
        let mut mask = self.include.mask(table)?;
        for ex in &self.exclude {
            for (keep, drop) in mask.iter_mut().zip(ex.mask(table)?) {
                *keep &= !drop;
            }
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_and_exclude() {
        let table = MetadataTable::new(5)
            .with_column("orientation_target", [15.0, 45.0, 20.0, 75.0, 15.0])
            .unwrap()
            .with_column("present", [1.0, 1.0, 1.0, 1.0, 0.0])
            .unwrap();
        let contrast = Contrast {
            name: "targetAngle".into(),
            include: ValueSet::new("orientation_target", [15.0, 45.0, 75.0]),
            exclude: vec![ValueSet::new("present", [0.0])],
        };
        assert_eq!(contrast.select(&table).unwrap(), vec![true, true, false, true, false]);
    }

    #[test]
    fn test_nan_excludes_missing() {
        let table = MetadataTable::new(3)
            .with_column("correct", [MetadataValue::Number(1.0), MetadataValue::Missing, 0.0.into()])
            .unwrap();
        let contrast = Contrast {
            name: "accuracy".into(),
            include: ValueSet::new("correct", [0.0, 1.0]),
            exclude: vec![ValueSet::new("correct", [f64::NAN])],
        };
        assert_eq!(contrast.select(&table).unwrap(), vec![true, false, true]);
    }
}
