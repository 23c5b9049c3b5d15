//! # Mesh Pool Configuration
//!
//! Initial sizing for freshly allocated meshes, loaded once at startup:
//!
//! ```toml
//! initial_vertices = 24
//! initial_indices = 36
//! face_growth = 32
//! with_xyz_faces = true
//!
//! [channels]
//! normals = true
//! uv = true
//! rgba = true
//! rgba2 = false
//! flags = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::mesh_data::ChannelSet;

/// Default increment for per-face arrays.
pub const DEFAULT_FACE_GROWTH: usize = 32;

/// Sizing used by [`crate::MeshData::from_config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Vertex capacity of a new mesh.
    pub initial_vertices: usize,
    /// Index capacity of a new mesh.
    pub initial_indices: usize,
    /// Optional channels to allocate.
    pub channels: ChannelSet,
    /// Pre-size the per-quad face index array.
    pub with_xyz_faces: bool,
    /// Pre-size the per-quad climate tint array.
    pub with_tints: bool,
    /// Pre-size the per-quad render pass array.
    pub with_render_passes: bool,
    /// Increment applied when a per-face array is full.
    pub face_growth: usize,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            initial_vertices: 24,
            initial_indices: 36,
            channels: ChannelSet::STANDARD,
            with_xyz_faces: false,
            with_tints: false,
            with_render_passes: false,
            face_growth: DEFAULT_FACE_GROWTH,
        }
    }
}

impl MeshConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidConfig`] on malformed TOML or values
    /// rejected by [`Self::validate`].
    pub fn from_toml_str(source: &str) -> MeshResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| MeshError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ConfigIo`] if the file cannot be read, otherwise
    /// as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| MeshError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            vertices = config.initial_vertices,
            indices = config.initial_indices,
            "Loaded mesh config"
        );
        Ok(config)
    }

    /// Checks invariants the growth policy depends on.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidConfig`] when `face_growth` is zero.
    pub fn validate(&self) -> MeshResult<()> {
        if self.face_growth == 0 {
            return Err(MeshError::InvalidConfig(
                "face_growth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
