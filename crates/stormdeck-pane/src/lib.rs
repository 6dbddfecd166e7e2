//! Stormdeck Pane
//!
//! Adapter between one configuration slot and one animation engine.
//!
//! A [`PaneWidget`] reads its slot through a [`stormdeck_store::SlotView`],
//! turns raw values into an [`AnimationConfig`] with [`resolve_config`], and
//! builds a fresh engine through an [`EngineFactory`] for every complete
//! configuration it sees. Incomplete or garbled values are tolerated and
//! leave the current engine running.

pub mod config;
pub mod engine;
pub mod measure;
pub mod widget;

pub use config::{
    AnimationConfig, ConfigError, ConfigOutcome, TIME_FIELD, legend_container_id, resolve_config,
    spinner_container_id,
};
pub use engine::{AnimationEngine, EngineFactory};
pub use measure::{MeasuredElement, Measurement};
pub use widget::{PaneWidget, RenderState};
