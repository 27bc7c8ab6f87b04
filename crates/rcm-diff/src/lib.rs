//! Diff engine for the record collection merger (RCM).
//!
//! Compares records of the same identity section by section and renders the
//! human-readable difference report a merge driver prints alongside its
//! output.
//!
//! # Key Types
//!
//! - [`RecordDiff`] —Per-section difference flags for one record pair
//! - [`diff_records`] —Compare two records, all sections evaluated
//! - [`describe_pair`] —Report lines for a pair, absence-aware

pub mod record_diff;
pub mod report;

pub use record_diff::{diff_records, RecordDiff};
pub use report::describe_pair;
