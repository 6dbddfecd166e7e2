//! Error types for the workspace controller.

use stormdeck_core::{IdError, PaneId};
use stormdeck_layout::TreeError;
use stormdeck_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("pane id '{0}' is already assigned")]
    DuplicatePane(PaneId),

    #[error("no pane with id '{0}' exists in the workspace")]
    UnknownPane(String),

    #[error("invalid slot index {0}")]
    InvalidSlot(i64),

    #[error("invalid workspace id: {0}")]
    InvalidWorkspaceId(IdError),

    #[error("creation counter changed underneath an increment (read {expected}, found {found:?})")]
    CounterRace { expected: u64, found: Option<u64> },

    #[error("workspace container has not been set")]
    NotInitialized,

    #[error("configuration could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

impl From<IdError> for WorkspaceError {
    fn from(err: IdError) -> Self {
        match err {
            IdError::InvalidSlot(index) => WorkspaceError::InvalidSlot(index),
            other => WorkspaceError::InvalidWorkspaceId(other),
        }
    }
}
