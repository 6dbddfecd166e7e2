//! Shared types for the layout tree.

use stormdeck_core::{Rect, SlotIndex};

/// Node identifier in the layout tree. Never reused within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Absolute rectangle computed for a node, in workspace pixels.
pub type LayoutRect = Rect<f32>;

/// What a pane leaf hosts. The tree treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneDescriptor {
    /// Component name the host registered the pane under.
    pub component: String,
    /// Tab label.
    pub title: String,
    /// Configuration slot requested by the host. `None` lets the workspace assign one.
    pub slot: Option<SlotIndex>,
}

impl PaneDescriptor {
    pub fn new(component: impl Into<String>) -> Self {
        let component = component.into();
        Self {
            title: component.clone(),
            component,
            slot: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_slot(mut self, slot: SlotIndex) -> Self {
        self.slot = Some(slot);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Vertical list of rows.
    Root,
    /// Horizontal list of stacks.
    Row,
    /// Tabbed container. `active` is the pane in front.
    Stack { active: Option<NodeId> },
    Pane(PaneDescriptor),
}

impl NodeKind {
    pub fn is_row(&self) -> bool {
        matches!(self, NodeKind::Row)
    }

    pub fn is_stack(&self) -> bool {
        matches!(self, NodeKind::Stack { .. })
    }

    pub fn is_pane(&self) -> bool {
        matches!(self, NodeKind::Pane(_))
    }
}

/// Where a moved pane ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Join an existing stack, at `index` or at the end.
    Into { stack: NodeId, index: Option<usize> },
    /// Open a new stack in `row` at `index`.
    NewStack { row: NodeId, index: usize },
    /// Open a new row at `index` holding a single new stack.
    NewRow { index: usize },
}
