//! Stormdeck Core
//!
//! Shared building blocks for the Stormdeck workspace crates: pane and slot
//! identities, geometry, workspace configuration, logging and profiling.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod id;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::{DropPolicyKind, ResizePolicy, WorkspaceConfig};
pub use geometry::{Pos, Rect, Size};
pub use id::{IdError, LayoutHandle, PaneId, SlotIndex, WorkspaceId};
