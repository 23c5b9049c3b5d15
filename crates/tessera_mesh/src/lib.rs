//! # Tessera Mesh
//!
//! Dynamic mesh buffers for block and entity tesselation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      MESH PIPELINE                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Tesselator → MeshData (append, grow) → merge per pass       │
//! │        ↓                                      ↓              │
//! │  rotate / scale / model transform      byte views → upload   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - Appends never fail; buffers grow to fit
//! - Counts never exceed capacity
//! - Clearing keeps allocations so meshes can be pooled
//! - Merge sources are never modified

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod custom;
pub mod draw;
pub mod error;
pub mod mesh_data;
pub mod merge;
pub mod normal;
pub mod transform;

pub use config::{MeshConfig, DEFAULT_FACE_GROWTH};
pub use custom::{CustomBytes, CustomFloats, CustomInts, CustomMeshDataPart};
pub use draw::{ChunkRenderPass, DrawMode, DEFAULT_RENDER_PASS};
pub use error::{MeshError, MeshResult};
pub use mesh_data::{
    ChannelSet, ChannelUsage, MeshData, MeshUsage, FLAGS_SIZE, INDEX_SIZE, NORMAL_SIZE, QUAD_INDICES,
    QUAD_VERTICES, RGBA_SIZE, UV_SIZE, XYZ_SIZE,
};
pub use normal::{pack_normal, pack_normal_vec, unpack_normal, NORMAL_SCALE};
