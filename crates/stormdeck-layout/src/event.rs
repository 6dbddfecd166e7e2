//! Lifecycle events emitted by the layout tree.

use stormdeck_core::SlotIndex;

use crate::types::NodeId;

/// Events emitted by the tree, in the order the changes happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    StackCreated {
        stack: NodeId,
    },
    /// A new pane leaf exists.
    ItemCreated {
        pane: NodeId,
    },
    /// A pane's tab was rendered into a stack header. Fires again after a move.
    TabCreated {
        pane: NodeId,
    },
    /// The selected stack, or the pane in front of it, changed.
    SelectionChanged {
        stack: NodeId,
        pane: Option<NodeId>,
    },
    /// A drag and drop finished.
    ItemDropped {
        pane: NodeId,
        stack: NodeId,
    },
    /// A pane left the tree. Carries what the owner needs to clean up since
    /// the node can no longer be looked up.
    ItemDestroyed {
        pane: NodeId,
        ids: Vec<String>,
        slot: Option<SlotIndex>,
    },
    StackDestroyed {
        stack: NodeId,
    },
}

impl TreeEvent {
    /// The node this event is about.
    pub fn node(&self) -> NodeId {
        match self {
            TreeEvent::StackCreated { stack } => *stack,
            TreeEvent::ItemCreated { pane } => *pane,
            TreeEvent::TabCreated { pane } => *pane,
            TreeEvent::SelectionChanged { stack, .. } => *stack,
            TreeEvent::ItemDropped { pane, .. } => *pane,
            TreeEvent::ItemDestroyed { pane, .. } => *pane,
            TreeEvent::StackDestroyed { stack } => *stack,
        }
    }
}

/// A FIFO of tree events drained by the owner.
#[derive(Debug, Default)]
pub struct TreeEventBuffer {
    events: Vec<TreeEvent>,
}

impl TreeEventBuffer {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: TreeEvent) {
        tracing::trace!(?event, "tree event");
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = TreeEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
