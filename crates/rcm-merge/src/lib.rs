//! Merge engine for the record collection merger (RCM).
//!
//! Implements the record survival policy and the three-way reconciliation
//! pass a merge driver runs over ancestor, current, and other collections.
//!
//! # Key Types
//!
//! - [`merge_records`] —Decide the surviving record for one identity
//! - [`reconcile`] / [`ReconcileOutcome`] —Whole-collection pass with report
//! - [`identity_union`] —First-seen union of identity sequences
//! - [`MergeError`] / [`ReconcileError`] —Fault conditions

pub mod error;
pub mod merge;
pub mod reconcile;

pub use error::{MergeError, MergeResult, ReconcileError, ReconcileResult};
pub use merge::merge_records;
pub use reconcile::{identity_union, reconcile, ReconcileOutcome};
