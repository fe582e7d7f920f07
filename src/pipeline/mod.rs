//! Per-subject analysis runs and cross-subject summaries

mod run;
mod summary;

pub use run::{run_analysis, select_trials, DecodingRecord};
pub use summary::{summarize_subject, GroupSummary, SubjectSummary, SummaryOptions, VISIBILITY_COLUMN};
