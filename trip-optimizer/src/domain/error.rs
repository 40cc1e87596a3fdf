//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are fatal for the route being processed but
//! never for a batch: the orchestrator converts them into empty results.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A solver was handed zero candidates
    #[error("candidate set is empty")]
    EmptyCandidateSet,

    /// Parallel metric arrays disagree on length
    #[error("mismatched metric arrays: times={times}, prices={prices}, connections={connections}")]
    MismatchedArrays {
        times: usize,
        prices: usize,
        connections: usize,
    },

    /// Invalid alternative construction (e.g. negative price)
    #[error("invalid alternative: {0}")]
    InvalidAlternative(&'static str),

    /// Invalid constraint set construction
    #[error("invalid constraints: {0}")]
    InvalidConstraints(&'static str),

    /// A constraint row does not match the candidate count
    #[error("constraint row has {row} coefficients for {candidates} candidates")]
    MismatchedRow { row: usize, candidates: usize },

    /// A metric that must be finite and non-negative is not
    #[error("invalid {metric} at index {index}: must be finite and non-negative")]
    InvalidMetric { metric: &'static str, index: usize },

    /// A value that must be finite is NaN or infinite
    #[error("non-finite {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },
}
