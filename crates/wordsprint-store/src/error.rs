//! Error types for the store layer.
//!
//! All store failures are propagated via [`StoreError`]. Timeouts surface
//! as [`StoreError::Redis`] (fred raises a timeout error once the
//! configured command timeout elapses), so a slow store always fails fast
//! rather than stalling the request handler.

/// Errors that can occur in the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A Redis operation failed (connection loss, timeout, protocol error).
    #[error("Redis error: {0}")]
    Redis(#[from] fred::error::Error),

    /// An operation was applied to a key holding a different data type.
    #[error("wrong type for key: {0}")]
    WrongType(String),

    /// A stored counter would overflow.
    #[error("counter overflow for key: {0}")]
    Overflow(String),
}
