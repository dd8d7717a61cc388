//! Error type shared by every component.

/// Precondition violations raised before any optimization work starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectError {
    /// Capacity was negative.
    #[error("capacity must be non-negative, got {0}")]
    InvalidCapacity(i64),

    /// A candidate failed validation at construction time.
    #[error("malformed candidate {label:?}: {reason}")]
    MalformedCandidate { label: String, reason: String },

    /// `candidates × (min(capacity, total weight) + 1)` exceeds the
    /// configured ceiling, does not fit in `usize`, or a tabulated solve
    /// could not allocate its table. `capacity` is the requested capacity.
    #[error(
        "state space of {candidates} candidates at capacity {capacity} exceeds the limit of {limit} states"
    )]
    StateSpaceTooLarge {
        candidates: usize,
        capacity: u64,
        limit: usize,
    },

    /// A builder or solver configuration was rejected by `validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
