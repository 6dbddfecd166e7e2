//! Error types for tree operations.

use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("node {0:?} is not a row")]
    NotARow(NodeId),
    #[error("node {0:?} is not a stack")]
    NotAStack(NodeId),
    #[error("node {0:?} is not a pane")]
    NotAPane(NodeId),
    #[error("id '{id}' is already assigned to node {owner:?}")]
    DuplicateId { id: String, owner: NodeId },
    #[error("the root node cannot be removed")]
    CannotRemoveRoot,
    #[error("no tab drag in progress")]
    NoActiveDrag,
    #[error("layout engine error: {0}")]
    Layout(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

impl From<taffy::TaffyError> for TreeError {
    fn from(err: taffy::TaffyError) -> Self {
        TreeError::Layout(err.to_string())
    }
}
