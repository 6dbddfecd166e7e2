//! Vector math used for pointer positions during tab drags.
//!
//! Re-exports the SIMD-backed [`glam`] types the rest of the workspace uses.
//!
//! ```
//! use stormdeck_core::math::Vec2;
//!
//! let start = Vec2::new(10.0, 20.0);
//! let pointer = Vec2::new(13.0, 24.0);
//! assert_eq!((pointer - start).length(), 5.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::Vec2;
