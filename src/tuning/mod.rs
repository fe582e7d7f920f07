//! Tuning-curve and error aggregation
//!
//! Post-processing of prediction tensors: angle readout, signed error
//! histograms, probability realignment and cross-subject reduction.

mod aggregate;
mod histogram;
mod readout;
mod realign;
mod visibility;

pub use aggregate::{aggregate_across_subjects, Reduction};
pub use histogram::{build_tuning_curve, diagonal, tuning_tensor, TuningCurve};
pub use readout::{classifier_errors, probabilities_to_angle, Readout};
pub use realign::{mean_realigned_diagonal, realign, realign_tensor, realign_vector};
pub use visibility::{subdivide_by_visibility, Selection};
