//! Three-way collection reconciliation.
//!
//! One linear pass over the union of identities: resolve each identity in
//! the current and other collections, describe the pair for the report, and
//! let the survival policy pick the output record. The whole outcome is
//! computed in memory; writing it anywhere is the caller's business.

use std::collections::BTreeSet;

use rcm_diff::describe_pair;
use rcm_types::RecordCollection;
use tracing::debug;

use crate::error::{MergeError, ReconcileError, ReconcileResult};
use crate::merge::merge_records;

/// Outcome of a reconciliation pass.
#[derive(Clone, Debug, Default)]
pub struct ReconcileOutcome {
    /// The merged collection, ordered by the identity union.
    pub merged: RecordCollection,
    /// Difference report lines accumulated across all identities.
    pub report: Vec<String>,
}

/// Union the identity sequences of three collections.
///
/// Identities are concatenated ancestor, current, other and de-duplicated
/// keeping first-seen order.
pub fn identity_union(
    ancestor: &RecordCollection,
    current: &RecordCollection,
    other: &RecordCollection,
) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut union = Vec::new();
    for id in ancestor
        .ids()
        .iter()
        .chain(current.ids())
        .chain(other.ids())
    {
        if seen.insert(id.as_str()) {
            union.push(id.clone());
        }
    }
    union
}

/// Reconcile three collections into one merged collection plus a report.
///
/// The ancestor contributes identities to the union but no content. Each
/// union identity resolves to a (current, other) pair, with absence being a
/// valid state for either side; an identity absent from both sides faults
/// the whole pass. Output order follows the union order.
pub fn reconcile(
    ancestor: &RecordCollection,
    current: &RecordCollection,
    other: &RecordCollection,
) -> ReconcileResult<ReconcileOutcome> {
    let union = identity_union(ancestor, current, other);
    debug!(identities = union.len(), "reconciling record collections");

    let mut report = Vec::new();
    let mut merged = Vec::with_capacity(union.len());
    for id in &union {
        let current_side = current.fetch(id);
        let other_side = other.fetch(id);

        report.extend(describe_pair(&current_side, &other_side));

        let survivor = match merge_records(&current_side, &other_side) {
            Ok(record) => record,
            Err(MergeError::BothAbsent) => {
                return Err(ReconcileError::BothAbsent { id: id.clone() });
            }
        };
        merged.push(survivor);
    }

    let merged = RecordCollection::from_records(merged);
    debug!(
        records = merged.len(),
        report_lines = report.len(),
        "reconciliation complete"
    );
    Ok(ReconcileOutcome { merged, report })
}
