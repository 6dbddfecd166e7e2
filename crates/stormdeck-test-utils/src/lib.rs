//! Test utilities for Stormdeck.
//!
//! - [`fixtures`] - raw slot values in the shapes hosts write
//! - `MockEngineFactory` - recording animation engine (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use std::sync::Arc;
//! use stormdeck_pane::{AnimationConfig, EngineFactory};
//! use stormdeck_test_utils::{MockEngineFactory, fixtures};
//!
//! let factory = Arc::new(MockEngineFactory::new());
//! let config = AnimationConfig::from_object(fixtures::radar_object(), "ws-0-map").unwrap();
//!
//! let mut engine = factory.build(&config);
//! engine.create();
//! engine.destroy();
//!
//! assert_eq!(factory.count_creates(), 1);
//! assert_eq!(factory.count_destroys(), 1);
//! # }
//! ```

pub mod fixtures;
#[cfg(feature = "mock")]
pub mod mock_engine;

#[cfg(feature = "mock")]
pub use mock_engine::*;
