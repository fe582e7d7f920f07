//! Epoch data and trial metadata
//!
//! Loading and epoching raw recordings happens upstream; this module only
//! holds the in-memory result and the trial filter language applied to it.

mod epochs;
mod metadata;
pub mod query;
pub mod synthetic;

pub use epochs::EpochFeatures;
pub use metadata::{MetadataTable, MetadataValue};
pub use query::{filter_mask, Predicate};
pub use synthetic::{SyntheticOrientation, TOY_ANGLES};
