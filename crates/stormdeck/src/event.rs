//! Notifications for the host application.

use stormdeck_core::{PaneId, SlotIndex};

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// The stored selection now names `pane`.
    SelectionChanged { pane: PaneId },
    FullscreenToggled { pane: PaneId, fullscreen: bool },
    SliderRotated { pane: PaneId, vertical: bool },
    /// The user asked to save the pane's configuration as a favorite.
    FavoriteRequested { pane: PaneId, config: Option<String> },
    ShareRequested { pane: PaneId, config: Option<String> },
    /// A pane left the workspace and its engine was destroyed.
    PaneRemoved { pane: PaneId, slot: SlotIndex },
}

impl WorkspaceEvent {
    pub fn pane(&self) -> &PaneId {
        match self {
            WorkspaceEvent::SelectionChanged { pane }
            | WorkspaceEvent::FullscreenToggled { pane, .. }
            | WorkspaceEvent::SliderRotated { pane, .. }
            | WorkspaceEvent::FavoriteRequested { pane, .. }
            | WorkspaceEvent::ShareRequested { pane, .. }
            | WorkspaceEvent::PaneRemoved { pane, .. } => pane,
        }
    }
}

/// Queue of host notifications, drained with
/// [`WorkspaceController::drain_events`](crate::WorkspaceController::drain_events).
#[derive(Debug, Default)]
pub struct WorkspaceEventBuffer {
    events: Vec<WorkspaceEvent>,
}

impl WorkspaceEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: WorkspaceEvent) {
        tracing::trace!(?event, "workspace event");
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = WorkspaceEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
