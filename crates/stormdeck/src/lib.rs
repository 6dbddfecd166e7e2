//! Stormdeck - multi-pane weather animation workspace
//!
//! Hosts several independently configured animation panes in one tabbed,
//! draggable, resizable workspace and keeps a single selected pane in sync
//! between the layout tree, the shared store and the pane widgets.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use stormdeck::prelude::*;
//!
//! let store = SharedStore::new();
//! let mut workspace = WorkspaceController::new(store, Arc::new(MyEngineFactory))?;
//!
//! workspace
//!     .set_container("ws")?
//!     .create_windows(4)?
//!     .push(&serde_json::json!({ "time": { "start": -3, "end": 0 } }))?;
//!
//! workspace.on_selection_changed(|pane| println!("selected {pane}"));
//! workspace.select(Some(0))?;
//! ```
//!
//! # Crates
//!
//! - [`core`] - identities, geometry, configuration, logging, profiling
//! - [`store`] - the shared key/value store
//! - [`layout`] - the row/stack/pane tree and drop zones
//! - [`pane`] - the pane adapter and engine traits

pub mod controller;
pub mod error;
pub mod event;
pub mod menu;
pub mod resize;

pub use stormdeck_core as core;
pub use stormdeck_layout as layout;
pub use stormdeck_pane as pane;
pub use stormdeck_store as store;

pub use controller::{ANIMATION_COMPONENT, PaneEntry, WorkspaceController};
pub use error::{WorkspaceError, WorkspaceResult};
pub use event::{WorkspaceEvent, WorkspaceEventBuffer};
pub use menu::{MenuAction, PaneFlags, TabMenu};
pub use resize::ResizeWatcher;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::controller::{PaneEntry, WorkspaceController};
    pub use crate::error::{WorkspaceError, WorkspaceResult};
    pub use crate::event::WorkspaceEvent;
    pub use crate::menu::{MenuAction, PaneFlags};

    pub use stormdeck_core::math::Vec2;
    pub use stormdeck_core::{
        DropPolicyKind, PaneId, ResizePolicy, Size, SlotIndex, WorkspaceConfig, WorkspaceId,
    };
    pub use stormdeck_layout::{DropZonePolicy, LayoutTree, NodeId, PaneDescriptor};
    pub use stormdeck_pane::{AnimationConfig, AnimationEngine, EngineFactory, PaneWidget};
    pub use stormdeck_store::{SharedStore, StoreKey, StoreValue};
}
