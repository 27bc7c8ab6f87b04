//! Error types for the merge crate.

/// Errors from merging a single record pair.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Neither side of the pair holds a present record.
    #[error("cannot merge two absent records")]
    BothAbsent,
}

/// Errors from reconciling three collections.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// An identity entered the union yet resolved to an absent record on
    /// both the current and the other side. Union identities come from the
    /// three input collections, so this indicates a logic fault rather than
    /// bad input, and it must never be papered over with an empty record.
    #[error("identity {id:?} is in the union but absent from current and other")]
    BothAbsent { id: String },
}

/// Convenience alias for pair merge results.
pub type MergeResult<T> = Result<T, MergeError>;

/// Convenience alias for reconciliation results.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
