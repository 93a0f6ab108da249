use thiserror::Error;

/// Error taxonomy for all engine operations.
///
/// Every failure aborts the whole action with no partial state change.
/// Only [`EngineError::NotReady`] is transient; every other kind means the
/// request itself must change before retrying.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed input (oversized dice count, empty or oversized batch,
    /// non-positive config values).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Caller lacks the required role.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// No plays, chances, or purchase allowance left.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Token balance too low to cover a purchase.
    #[error("insufficient balance (needed={needed}, available={available})")]
    InsufficientBalance { needed: u64, available: u64 },

    /// Randomness for the requested height is not yet available; retry later.
    #[error("not ready: {0}")]
    NotReady(String),

    /// Lookup of a round or config entity that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation attempted before its prerequisite configuration exists.
    #[error("invalid state: {0}")]
    InvalidState(String),
}
