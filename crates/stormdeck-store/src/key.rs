use std::fmt;

use stormdeck_core::{SlotIndex, WorkspaceId};

/// A key in the shared store.
///
/// Workspace-management keys are owned by the controller; slot keys may be
/// written by anyone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Creation counter. Only ever incremented.
    WindowsCreated(WorkspaceId),
    /// Id of the selected pane, or null.
    Selected(WorkspaceId),
    /// Handle to the workspace's layout tree.
    Layout(WorkspaceId),
    /// Serialized configuration for one pane.
    Slot(SlotIndex),
    /// Pane currently bound to a slot.
    Window(SlotIndex),
}

impl StoreKey {
    pub fn is_slot(&self) -> bool {
        matches!(self, StoreKey::Slot(_))
    }

    pub fn slot(&self) -> Option<SlotIndex> {
        match self {
            StoreKey::Slot(slot) | StoreKey::Window(slot) => Some(*slot),
            _ => None,
        }
    }

    pub fn workspace(&self) -> Option<&WorkspaceId> {
        match self {
            StoreKey::WindowsCreated(ws) | StoreKey::Selected(ws) | StoreKey::Layout(ws) => Some(ws),
            _ => None,
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::WindowsCreated(ws) => write!(f, "{}-numWindowsCreated", ws),
            StoreKey::Selected(ws) => write!(f, "{}-selected", ws),
            StoreKey::Layout(ws) => write!(f, "{}-layout", ws),
            StoreKey::Slot(slot) => write!(f, "{}", slot),
            StoreKey::Window(slot) => write!(f, "window-{}", slot),
        }
    }
}
