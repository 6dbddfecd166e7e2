//! Stormdeck Layout
//!
//! The workspace tree: a column of rows, each row a set of tabbed stacks,
//! each stack a set of panes with exactly one in front.
//!
//! The tree never calls back into its owner. Every lifecycle change is
//! queued as a [`TreeEvent`] and drained by the controller with
//! [`LayoutTree::drain_events`], so handlers always run to completion before
//! the next change is observed.
//!
//! ```
//! use stormdeck_layout::{LayoutTree, PaneDescriptor, TreeEvent};
//!
//! let mut tree = LayoutTree::new().unwrap();
//! let row = tree.add_row().unwrap();
//! let stack = tree.add_stack(row).unwrap();
//! let pane = tree.add_pane(stack, PaneDescriptor::new("radar")).unwrap();
//!
//! let events: Vec<_> = tree.drain_events().collect();
//! assert!(events.contains(&TreeEvent::ItemCreated { pane }));
//! ```

pub mod drag;
pub mod drop_zone;
pub mod error;
pub mod event;
pub mod tree;
pub mod types;

pub use drag::{DRAG_THRESHOLD, DragSession};
pub use drop_zone::{
    BodyOnlyPolicy, DEFAULT_EDGE_THRESHOLD, DropHighlight, DropSegment, DropZonePolicy,
    NearestEdgePolicy, SegmentArea, policy_for, stack_segments,
};
pub use error::{TreeError, TreeResult};
pub use event::{TreeEvent, TreeEventBuffer};
pub use tree::{DEFAULT_HEADER_HEIGHT, LayoutTree, TreeNode};
pub use types::{LayoutRect, NodeId, NodeKind, PaneDescriptor, Placement};
