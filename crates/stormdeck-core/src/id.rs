//! Identities shared by the store, the layout tree and the controller.
//!
//! Slot indices are validated when they cross into the workspace so the rest
//! of the code never sees a negative or non-integer key.

use std::fmt;

/// Errors raised when converting raw host values into identities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("invalid slot index {0}: slots are non-negative 32-bit integers")]
    InvalidSlot(i64),
    #[error("workspace id must not be empty")]
    EmptyWorkspaceId,
}

/// Id of the workspace container. Prefixes every workspace-management key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdError::EmptyWorkspaceId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a configuration slot. Each pane reads exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u32);

impl SlotIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl TryFrom<i64> for SlotIndex {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(SlotIndex)
            .map_err(|_| IdError::InvalidSlot(value))
    }
}

impl From<u32> for SlotIndex {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Externally visible pane identity, `<workspaceId>-<slotIndex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(String);

impl PaneId {
    /// Wrap an id reported by the host or the layout tree.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn for_slot(workspace: &WorkspaceId, slot: SlotIndex) -> Self {
        Self(format!("{}-{}", workspace, slot))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the element hosting the pane's map surface.
    pub fn container_element_id(&self) -> String {
        format!("{}-map", self.0)
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Opaque handle back to a layout tree root.
///
/// Stored under `<workspaceId>-layout` so external callers can check which
/// tree a programmatic selection will be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutHandle(u64);

impl LayoutHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_rejects_negative() {
        assert_eq!(SlotIndex::try_from(-1i64), Err(IdError::InvalidSlot(-1)));
        assert_eq!(SlotIndex::try_from(3i64), Ok(SlotIndex::new(3)));
        assert!(SlotIndex::try_from(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn pane_id_format() {
        let ws = WorkspaceId::new("ws").unwrap();
        let id = PaneId::for_slot(&ws, SlotIndex::new(2));
        assert_eq!(id.as_str(), "ws-2");
        assert_eq!(id.container_element_id(), "ws-2-map");
    }

    #[test]
    fn empty_workspace_id_rejected() {
        assert_eq!(WorkspaceId::new(""), Err(IdError::EmptyWorkspaceId));
    }
}
