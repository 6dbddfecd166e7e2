//! Error types for the state store.

use crate::value::StoreValue;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A compare-and-swap saw a different value than the caller read.
    #[error("conflicting write to '{key}': expected {expected:?}, found {found:?}")]
    Conflict {
        key: String,
        expected: StoreValue,
        found: StoreValue,
    },
    /// The value under a key has a different shape than the operation needs.
    #[error("value under '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
    #[error("unknown subscription {0}")]
    UnknownSubscription(u64),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
