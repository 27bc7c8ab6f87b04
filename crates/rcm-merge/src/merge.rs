//! Per-record survival policy.
//!
//! The policy is deliberately blunt for a merge driver: presence beats
//! absence, and between two present records any difference at all lets the
//! other side win. There is no field-level blending.

use rcm_diff::diff_records;
use rcm_types::Record;

use crate::error::{MergeError, MergeResult};

/// Decide which record survives for one identity.
///
/// An absent side loses to a present one. When both sides are present and
/// differ in any section, the `other` record wins wholesale; when nothing
/// differs, `current` survives. Two absent sides are a fault, not a merge.
pub fn merge_records(current: &Record, other: &Record) -> MergeResult<Record> {
    match (current.present, other.present) {
        (false, false) => Err(MergeError::BothAbsent),
        (false, true) => Ok(other.clone()),
        (true, false) => Ok(current.clone()),
        (true, true) => {
            let diff = diff_records(current, other);
            if diff.has_differences {
                Ok(other.clone())
            } else {
                Ok(current.clone())
            }
        }
    }
}
