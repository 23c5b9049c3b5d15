//! # Tessera Shared
//!
//! Common value types used by the mesh buffer engine and the attribute tree.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a GPU or window crate. Meshes are handed
//! to the host runtime for upload; this crate only describes data.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod facing;
pub mod transform;

pub use color::{color_from_rgba, scale_channel, to_rgba_bytes, WHITE_RGBA};
pub use facing::BlockFacing;
pub use transform::{ModelTransform, DEG2RAD};

// Re-exported so downstream crates agree on one math library version.
pub use glam;
