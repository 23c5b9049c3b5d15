//! # MeshData
//!
//! A dynamically growing, multi-channel vertex and index buffer. The
//! tesselators append vertices while walking blocks, then the whole thing is
//! handed to the uploader, which reads the counts and the byte views.
//!
//! ## Layout
//!
//! Every vertex channel is a flat array sized to the vertex capacity
//! (`vertices_max`) times its component count:
//!
//! | Channel  | Element | Per vertex |
//! |----------|---------|------------|
//! | xyz      | `f32`   | 3          |
//! | normals  | `i32`   | 1 (packed 2_10_10_10) |
//! | uv       | `f32`   | 2          |
//! | rgba     | `u8`    | 4          |
//! | rgba2    | `u8`    | 4          |
//! | flags    | `i32`   | 1          |
//!
//! Positions and indices are always allocated; the other channels are
//! optional and skipped by every append, merge and transform when absent.
//! Per-quad metadata (face index, climate tint, render pass) lives in
//! separate arrays that grow by a fixed increment.
//!
//! ## Invariants
//!
//! - `vertices_count <= vertices_max`, `indices_count <= indices_max`
//! - every present vertex channel holds at least `vertices_max` vertices
//! - growth never shrinks a buffer and never loses the valid prefix
//! - `clear()` resets counts and keeps every allocation

use serde::{Deserialize, Serialize};
use tessera_shared::{to_rgba_bytes, BlockFacing};

use crate::config::{MeshConfig, DEFAULT_FACE_GROWTH};
use crate::custom::{CustomBytes, CustomFloats, CustomInts};
use crate::draw::{ChunkRenderPass, DrawMode, DEFAULT_RENDER_PASS};
use crate::error::{MeshError, MeshResult};
use crate::normal::{pack_normal, pack_normal_vec};

// ============================================================================
// CHANNEL SIZES
// ============================================================================

/// Position components per vertex.
pub const XYZ_SIZE: usize = 3;
/// Packed normals per vertex.
pub const NORMAL_SIZE: usize = 1;
/// Texture coordinates per vertex.
pub const UV_SIZE: usize = 2;
/// Color bytes per vertex.
pub const RGBA_SIZE: usize = 4;
/// Flag words per vertex.
pub const FLAGS_SIZE: usize = 1;
/// Index buffer entries per index.
pub const INDEX_SIZE: usize = 1;
/// Indices per quad when tesselated as two triangles.
pub const QUAD_INDICES: usize = 6;
/// Vertices per quad.
pub const QUAD_VERTICES: usize = 4;

// ============================================================================
// CHANNEL SELECTION
// ============================================================================

/// Which optional vertex channels a mesh allocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSet {
    /// Packed normals.
    pub normals: bool,
    /// Texture coordinates.
    pub uv: bool,
    /// Primary color.
    pub rgba: bool,
    /// Secondary color.
    pub rgba2: bool,
    /// Render flags.
    pub flags: bool,
}

impl ChannelSet {
    /// Everything except normals. Matches block geometry.
    pub const STANDARD: Self = Self {
        normals: false,
        uv: true,
        rgba: true,
        rgba2: true,
        flags: true,
    };

    /// Every optional channel.
    pub const ALL: Self = Self {
        normals: true,
        uv: true,
        rgba: true,
        rgba2: true,
        flags: true,
    };

    /// Positions only.
    pub const NONE: Self = Self {
        normals: false,
        uv: false,
        rgba: false,
        rgba2: false,
        flags: false,
    };
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Upload hints for one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelUsage {
    /// Advance once per instance instead of once per vertex.
    pub instanced: bool,
    /// Upload once and never update.
    pub static_draw: bool,
    /// Byte offset into the uploader's buffer.
    pub offset: usize,
}

impl Default for ChannelUsage {
    fn default() -> Self {
        Self {
            instanced: false,
            static_draw: true,
            offset: 0,
        }
    }
}

/// Upload hints for every built-in channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshUsage {
    /// Positions.
    pub xyz: ChannelUsage,
    /// Normals.
    pub normals: ChannelUsage,
    /// Texture coordinates.
    pub uv: ChannelUsage,
    /// Primary color.
    pub rgba: ChannelUsage,
    /// Secondary color.
    pub rgba2: ChannelUsage,
    /// Flags.
    pub flags: ChannelUsage,
    /// Indices.
    pub indices: ChannelUsage,
}

/// Values written for one vertex. Absent parts are zeroed in present
/// channels so a reused slot never keeps stale data.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct VertexWrite {
    pub(crate) xyz: [f32; 3],
    pub(crate) normal: Option<i32>,
    pub(crate) uv: Option<[f32; 2]>,
    pub(crate) rgba: Option<[u8; 4]>,
    pub(crate) rgba2: Option<[u8; 4]>,
    pub(crate) flags: Option<i32>,
}

// ============================================================================
// MESH DATA
// ============================================================================

/// Growable multi-channel mesh buffer.
#[derive(Debug, PartialEq)]
pub struct MeshData {
    pub(crate) xyz: Vec<f32>,
    pub(crate) normals: Option<Vec<i32>>,
    pub(crate) uv: Option<Vec<f32>>,
    pub(crate) rgba: Option<Vec<u8>>,
    pub(crate) rgba2: Option<Vec<u8>>,
    pub(crate) flags: Option<Vec<i32>>,
    pub(crate) indices: Vec<u32>,

    pub(crate) xyz_faces: Vec<u8>,
    pub(crate) climate_tints: Vec<i32>,
    pub(crate) render_passes: Vec<i32>,

    /// Mod supplied `f32` channel.
    pub custom_floats: Option<CustomFloats>,
    /// Mod supplied `i32` channel.
    pub custom_ints: Option<CustomInts>,
    /// Mod supplied `u8` channel.
    pub custom_bytes: Option<CustomBytes>,

    /// Upload hints.
    pub usage: MeshUsage,
    /// Primitive topology.
    pub mode: DrawMode,

    pub(crate) vertices_count: usize,
    pub(crate) vertices_max: usize,
    pub(crate) indices_count: usize,
    pub(crate) indices_max: usize,
    pub(crate) normals_count: usize,
    pub(crate) xyz_faces_count: usize,
    pub(crate) tints_count: usize,
    pub(crate) render_pass_count: usize,
    face_growth: usize,
}

impl Default for MeshData {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshData {
    /// Empty mesh with no capacity. The first append allocates.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0, 0, ChannelSet::STANDARD)
    }

    /// Mesh with room for `vertices` vertices and `indices` indices.
    ///
    /// Allocated channels are zero-filled.
    #[must_use]
    pub fn with_capacity(vertices: usize, indices: usize, channels: ChannelSet) -> Self {
        Self {
            xyz: vec![0.0; vertices * XYZ_SIZE],
            normals: channels.normals.then(|| vec![0; vertices * NORMAL_SIZE]),
            uv: channels.uv.then(|| vec![0.0; vertices * UV_SIZE]),
            rgba: channels.rgba.then(|| vec![0; vertices * RGBA_SIZE]),
            rgba2: channels.rgba2.then(|| vec![0; vertices * RGBA_SIZE]),
            flags: channels.flags.then(|| vec![0; vertices * FLAGS_SIZE]),
            indices: vec![0; indices],
            xyz_faces: Vec::new(),
            climate_tints: Vec::new(),
            render_passes: Vec::new(),
            custom_floats: None,
            custom_ints: None,
            custom_bytes: None,
            usage: MeshUsage::default(),
            mode: DrawMode::Triangles,
            vertices_count: 0,
            vertices_max: vertices,
            indices_count: 0,
            indices_max: indices,
            normals_count: 0,
            xyz_faces_count: 0,
            tints_count: 0,
            render_pass_count: 0,
            face_growth: DEFAULT_FACE_GROWTH,
        }
    }

    /// Mesh sized from a pool configuration.
    #[must_use]
    pub fn from_config(config: &MeshConfig) -> Self {
        let mut mesh = Self::with_capacity(
            config.initial_vertices,
            config.initial_indices,
            config.channels,
        );
        mesh.face_growth = config.face_growth.max(1);
        if config.with_xyz_faces {
            mesh = mesh.with_xyz_faces();
        }
        if config.with_tints {
            mesh = mesh.with_tints();
        }
        if config.with_render_passes {
            mesh = mesh.with_render_passes();
        }
        mesh
    }

    /// Pre-sizes the per-quad face index array to the vertex capacity.
    #[must_use]
    pub fn with_xyz_faces(mut self) -> Self {
        let quads = self.vertices_max / QUAD_VERTICES;
        if self.xyz_faces.len() < quads {
            self.xyz_faces.resize(quads, 0);
        }
        self
    }

    /// Pre-sizes the per-quad climate tint array to the vertex capacity.
    #[must_use]
    pub fn with_tints(mut self) -> Self {
        let quads = self.vertices_max / QUAD_VERTICES;
        if self.climate_tints.len() < quads {
            self.climate_tints.resize(quads, 0);
        }
        self
    }

    /// Pre-sizes the per-quad render pass array to the vertex capacity.
    #[must_use]
    pub fn with_render_passes(mut self) -> Self {
        let quads = self.vertices_max / QUAD_VERTICES;
        if self.render_passes.len() < quads {
            self.render_passes.resize(quads, DEFAULT_RENDER_PASS);
        }
        self
    }

    /// Empty mesh with the same channel set and upload hints.
    #[must_use]
    pub fn empty_clone(&self) -> Self {
        let mut mesh = Self::with_capacity(0, 0, self.channels());
        mesh.usage = self.usage;
        mesh.mode = self.mode;
        mesh.face_growth = self.face_growth;
        mesh.custom_floats = self.custom_floats.as_ref().map(CustomFloats::empty_clone);
        mesh.custom_ints = self.custom_ints.as_ref().map(CustomInts::empty_clone);
        mesh.custom_bytes = self.custom_bytes.as_ref().map(CustomBytes::empty_clone);
        mesh
    }

    // ========================================================================
    // CHANNEL MANAGEMENT
    // ========================================================================

    /// Optional channels currently allocated.
    #[must_use]
    pub fn channels(&self) -> ChannelSet {
        ChannelSet {
            normals: self.normals.is_some(),
            uv: self.uv.is_some(),
            rgba: self.rgba.is_some(),
            rgba2: self.rgba2.is_some(),
            flags: self.flags.is_some(),
        }
    }

    /// Allocates the requested channels that are missing, zero-filled to the
    /// current capacity. Already present channels are untouched.
    pub fn enable_channels(&mut self, channels: ChannelSet) {
        let max = self.vertices_max;
        if channels.normals && self.normals.is_none() {
            self.normals = Some(vec![0; max * NORMAL_SIZE]);
        }
        if channels.uv && self.uv.is_none() {
            self.uv = Some(vec![0.0; max * UV_SIZE]);
        }
        if channels.rgba && self.rgba.is_none() {
            self.rgba = Some(vec![0; max * RGBA_SIZE]);
        }
        if channels.rgba2 && self.rgba2.is_none() {
            self.rgba2 = Some(vec![0; max * RGBA_SIZE]);
        }
        if channels.flags && self.flags.is_none() {
            self.flags = Some(vec![0; max * FLAGS_SIZE]);
        }
    }

    /// Drops the requested channels.
    pub fn disable_channels(&mut self, channels: ChannelSet) {
        if channels.normals {
            self.normals = None;
            self.normals_count = 0;
        }
        if channels.uv {
            self.uv = None;
        }
        if channels.rgba {
            self.rgba = None;
        }
        if channels.rgba2 {
            self.rgba2 = None;
        }
        if channels.flags {
            self.flags = None;
        }
    }

    // ========================================================================
    // COUNTS
    // ========================================================================

    /// Valid vertices.
    #[inline]
    #[must_use]
    pub const fn vertices_count(&self) -> usize {
        self.vertices_count
    }

    /// Vertex capacity.
    #[inline]
    #[must_use]
    pub const fn vertices_max(&self) -> usize {
        self.vertices_max
    }

    /// Valid indices.
    #[inline]
    #[must_use]
    pub const fn indices_count(&self) -> usize {
        self.indices_count
    }

    /// Index capacity.
    #[inline]
    #[must_use]
    pub const fn indices_max(&self) -> usize {
        self.indices_max
    }

    /// Normals appended with the `add_normal` family.
    #[inline]
    #[must_use]
    pub const fn normals_count(&self) -> usize {
        self.normals_count
    }

    /// Valid per-quad face indices.
    #[inline]
    #[must_use]
    pub const fn xyz_faces_count(&self) -> usize {
        self.xyz_faces_count
    }

    /// Valid per-quad climate tints.
    #[inline]
    #[must_use]
    pub const fn tints_count(&self) -> usize {
        self.tints_count
    }

    /// Valid per-quad render passes.
    #[inline]
    #[must_use]
    pub const fn render_pass_count(&self) -> usize {
        self.render_pass_count
    }

    /// Valid position floats.
    #[inline]
    #[must_use]
    pub const fn xyz_count(&self) -> usize {
        self.vertices_count * XYZ_SIZE
    }

    /// Valid uv floats.
    #[inline]
    #[must_use]
    pub const fn uv_count(&self) -> usize {
        self.vertices_count * UV_SIZE
    }

    /// Valid color bytes (same for both color channels).
    #[inline]
    #[must_use]
    pub const fn rgba_count(&self) -> usize {
        self.vertices_count * RGBA_SIZE
    }

    /// Valid flag words.
    #[inline]
    #[must_use]
    pub const fn flags_count(&self) -> usize {
        self.vertices_count * FLAGS_SIZE
    }

    /// Number of complete quads.
    #[inline]
    #[must_use]
    pub const fn quad_count(&self) -> usize {
        self.vertices_count / QUAD_VERTICES
    }

    /// True when no vertices are present.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vertices_count == 0
    }

    /// Overrides the vertex count, for uploading a prefix.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::CountExceedsCapacity`] above `vertices_max`.
    pub fn set_vertices_count(&mut self, count: usize) -> MeshResult<()> {
        if count > self.vertices_max {
            return Err(MeshError::CountExceedsCapacity {
                count,
                capacity: self.vertices_max,
            });
        }
        self.vertices_count = count;
        Ok(())
    }

    /// Overrides the index count, for uploading a prefix.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::CountExceedsCapacity`] above `indices_max`.
    pub fn set_indices_count(&mut self, count: usize) -> MeshResult<()> {
        if count > self.indices_max {
            return Err(MeshError::CountExceedsCapacity {
                count,
                capacity: self.indices_max,
            });
        }
        self.indices_count = count;
        Ok(())
    }

    // ========================================================================
    // CHANNEL ACCESS
    // ========================================================================

    /// Valid positions, three floats per vertex.
    #[inline]
    #[must_use]
    pub fn xyz(&self) -> &[f32] {
        &self.xyz[..self.xyz_count()]
    }

    /// Valid positions, mutable.
    #[inline]
    pub fn xyz_mut(&mut self) -> &mut [f32] {
        let count = self.xyz_count();
        &mut self.xyz[..count]
    }

    /// Packed normals for the valid vertices.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> Option<&[i32]> {
        let count = self.vertices_count.max(self.normals_count);
        self.normals.as_deref().map(|n| &n[..count.min(n.len())])
    }

    /// Valid texture coordinates, two floats per vertex.
    #[inline]
    #[must_use]
    pub fn uv(&self) -> Option<&[f32]> {
        let count = self.uv_count();
        self.uv.as_deref().map(|uv| &uv[..count])
    }

    /// Valid texture coordinates, mutable.
    #[inline]
    pub fn uv_mut(&mut self) -> Option<&mut [f32]> {
        let count = self.uv_count();
        self.uv.as_deref_mut().map(|uv| &mut uv[..count])
    }

    /// Valid primary colors, four bytes per vertex.
    #[inline]
    #[must_use]
    pub fn rgba(&self) -> Option<&[u8]> {
        let count = self.rgba_count();
        self.rgba.as_deref().map(|c| &c[..count])
    }

    /// Valid primary colors, mutable.
    #[inline]
    pub fn rgba_mut(&mut self) -> Option<&mut [u8]> {
        let count = self.rgba_count();
        self.rgba.as_deref_mut().map(|c| &mut c[..count])
    }

    /// Valid secondary colors, four bytes per vertex.
    #[inline]
    #[must_use]
    pub fn rgba2(&self) -> Option<&[u8]> {
        let count = self.rgba_count();
        self.rgba2.as_deref().map(|c| &c[..count])
    }

    /// Valid flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> Option<&[i32]> {
        let count = self.flags_count();
        self.flags.as_deref().map(|f| &f[..count])
    }

    /// Valid flags, mutable.
    #[inline]
    pub fn flags_mut(&mut self) -> Option<&mut [i32]> {
        let count = self.flags_count();
        self.flags.as_deref_mut().map(|f| &mut f[..count])
    }

    /// Valid indices.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.indices_count]
    }

    /// Valid per-quad face indices.
    #[inline]
    #[must_use]
    pub fn xyz_faces(&self) -> &[u8] {
        &self.xyz_faces[..self.xyz_faces_count]
    }

    /// Valid per-quad climate tints.
    #[inline]
    #[must_use]
    pub fn climate_tints(&self) -> &[i32] {
        &self.climate_tints[..self.tints_count]
    }

    /// Valid per-quad render pass tags.
    #[inline]
    #[must_use]
    pub fn render_passes(&self) -> &[i32] {
        &self.render_passes[..self.render_pass_count]
    }

    /// Position of one vertex.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= vertices_count()`.
    #[must_use]
    pub fn position(&self, vertex: usize) -> [f32; 3] {
        let p = &self.xyz()[vertex * XYZ_SIZE..vertex * XYZ_SIZE + XYZ_SIZE];
        [p[0], p[1], p[2]]
    }

    // ========================================================================
    // BYTE VIEWS (for upload)
    // ========================================================================

    /// Valid positions as bytes.
    #[must_use]
    pub fn xyz_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.xyz())
    }

    /// Valid normals as bytes.
    #[must_use]
    pub fn normals_bytes(&self) -> Option<&[u8]> {
        self.normals().map(bytemuck::cast_slice)
    }

    /// Valid texture coordinates as bytes.
    #[must_use]
    pub fn uv_bytes(&self) -> Option<&[u8]> {
        self.uv().map(bytemuck::cast_slice)
    }

    /// Valid flags as bytes.
    #[must_use]
    pub fn flags_bytes(&self) -> Option<&[u8]> {
        self.flags().map(bytemuck::cast_slice)
    }

    /// Valid indices as bytes.
    #[must_use]
    pub fn indices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices())
    }

    // ========================================================================
    // GROWTH
    // ========================================================================

    /// Grows every vertex channel by at least `min_increase` vertices.
    ///
    /// The new capacity is `max(vertices_max + min_increase, 2 * vertices_count)`,
    /// so repeated appends amortize to constant time. Normals that already
    /// outgrew the vertex capacity are never shrunk.
    pub fn grow_vertex_buffer(&mut self, min_increase: usize) {
        let new_max = (self.vertices_max + min_increase.max(1)).max(self.vertices_count * 2);

        self.xyz.resize(new_max * XYZ_SIZE, 0.0);
        if let Some(normals) = &mut self.normals {
            if normals.len() < new_max * NORMAL_SIZE {
                normals.resize(new_max * NORMAL_SIZE, 0);
            }
        }
        if let Some(uv) = &mut self.uv {
            uv.resize(new_max * UV_SIZE, 0.0);
        }
        if let Some(rgba) = &mut self.rgba {
            rgba.resize(new_max * RGBA_SIZE, 0);
        }
        if let Some(rgba2) = &mut self.rgba2 {
            rgba2.resize(new_max * RGBA_SIZE, 0);
        }
        if let Some(flags) = &mut self.flags {
            flags.resize(new_max * FLAGS_SIZE, 0);
        }

        tracing::trace!(from = self.vertices_max, to = new_max, "Grew vertex buffers");
        self.vertices_max = new_max;
    }

    /// Grows the index buffer by at least `min_increase` indices.
    pub fn grow_index_buffer(&mut self, min_increase: usize) {
        let new_max = (self.indices_max + min_increase.max(1)).max(self.indices_count * 2);
        self.indices.resize(new_max, 0);
        tracing::trace!(from = self.indices_max, to = new_max, "Grew index buffer");
        self.indices_max = new_max;
    }

    /// Grows the normals channel by at least `min_increase` entries,
    /// allocating it if absent.
    pub fn grow_normals_buffer(&mut self, min_increase: usize) {
        let count = self.normals_count;
        let normals = self.normals.get_or_insert_with(Vec::new);
        let new_len = (normals.len() + min_increase.max(1)).max(count * 2);
        normals.resize(new_len, 0);
    }

    /// Makes room for `additional` more vertices.
    pub fn reserve_vertices(&mut self, additional: usize) {
        let needed = self.vertices_count + additional;
        if needed > self.vertices_max {
            self.grow_vertex_buffer(needed - self.vertices_max);
        }
    }

    /// Makes room for `additional` more indices.
    pub fn reserve_indices(&mut self, additional: usize) {
        let needed = self.indices_count + additional;
        if needed > self.indices_max {
            self.grow_index_buffer(needed - self.indices_max);
        }
    }

    // ========================================================================
    // VERTEX APPENDS
    // ========================================================================

    /// Writes one vertex at the end, growing first if full.
    pub(crate) fn push_vertex(&mut self, v: &VertexWrite) {
        if self.vertices_count >= self.vertices_max {
            self.grow_vertex_buffer(1);
        }
        let i = self.vertices_count;

        self.xyz[i * XYZ_SIZE..(i + 1) * XYZ_SIZE].copy_from_slice(&v.xyz);
        if let Some(uv) = &mut self.uv {
            uv[i * UV_SIZE..(i + 1) * UV_SIZE].copy_from_slice(&v.uv.unwrap_or_default());
        }
        if let Some(rgba) = &mut self.rgba {
            rgba[i * RGBA_SIZE..(i + 1) * RGBA_SIZE].copy_from_slice(&v.rgba.unwrap_or_default());
        }
        if let Some(rgba2) = &mut self.rgba2 {
            rgba2[i * RGBA_SIZE..(i + 1) * RGBA_SIZE]
                .copy_from_slice(&v.rgba2.unwrap_or_default());
        }
        if let Some(flags) = &mut self.flags {
            flags[i] = v.flags.unwrap_or_default();
        }
        if let Some(normals) = &mut self.normals {
            match v.normal {
                Some(packed) => normals[i] = packed,
                // Slot not yet claimed by add_normal; clear what a pooled
                // buffer left behind.
                None if i >= self.normals_count => normals[i] = 0,
                None => {}
            }
        }

        self.vertices_count += 1;
    }

    /// Appends a position with texture coordinates.
    pub fn add_vertex(&mut self, xyz: [f32; 3], uv: [f32; 2]) {
        self.push_vertex(&VertexWrite {
            xyz,
            uv: Some(uv),
            ..VertexWrite::default()
        });
    }

    /// Appends a position with a packed color and no texture coordinates.
    pub fn add_vertex_skip_tex(&mut self, xyz: [f32; 3], color: u32) {
        self.push_vertex(&VertexWrite {
            xyz,
            rgba: Some(to_rgba_bytes(color)),
            ..VertexWrite::default()
        });
    }

    /// Appends a position, texture coordinates and packed color.
    pub fn add_vertex_with_color(&mut self, xyz: [f32; 3], uv: [f32; 2], color: u32) {
        self.add_vertex_with_flags(xyz, uv, color, 0);
    }

    /// Appends a position, texture coordinates, packed color and flags.
    pub fn add_vertex_with_flags(&mut self, xyz: [f32; 3], uv: [f32; 2], color: u32, flags: i32) {
        self.push_vertex(&VertexWrite {
            xyz,
            uv: Some(uv),
            rgba: Some(to_rgba_bytes(color)),
            flags: Some(flags),
            ..VertexWrite::default()
        });
    }

    /// Appends a position, texture coordinates and flags, leaving colors zeroed.
    pub fn add_vertex_with_flags_skip_color(&mut self, xyz: [f32; 3], uv: [f32; 2], flags: i32) {
        self.push_vertex(&VertexWrite {
            xyz,
            uv: Some(uv),
            flags: Some(flags),
            ..VertexWrite::default()
        });
    }

    /// Appends a position, texture coordinates and both packed colors.
    pub fn add_vertex_with_colors(
        &mut self,
        xyz: [f32; 3],
        uv: [f32; 2],
        color: u32,
        color2: u32,
    ) {
        self.add_vertex_with_colors_and_flags(xyz, uv, color, color2, 0);
    }

    /// Appends a position, texture coordinates, both packed colors and flags.
    pub fn add_vertex_with_colors_and_flags(
        &mut self,
        xyz: [f32; 3],
        uv: [f32; 2],
        color: u32,
        color2: u32,
        flags: i32,
    ) {
        self.push_vertex(&VertexWrite {
            xyz,
            uv: Some(uv),
            rgba: Some(to_rgba_bytes(color)),
            rgba2: Some(to_rgba_bytes(color2)),
            flags: Some(flags),
            ..VertexWrite::default()
        });
    }

    /// Appends a position, texture coordinates and an explicit color.
    pub fn add_vertex_rgba(&mut self, xyz: [f32; 3], uv: [f32; 2], rgba: [u8; 4]) {
        self.push_vertex(&VertexWrite {
            xyz,
            uv: Some(uv),
            rgba: Some(rgba),
            ..VertexWrite::default()
        });
    }

    /// Appends a position, texture coordinates and both explicit colors.
    pub fn add_vertex_rgba2(&mut self, xyz: [f32; 3], uv: [f32; 2], rgba: [u8; 4], rgba2: [u8; 4]) {
        self.push_vertex(&VertexWrite {
            xyz,
            uv: Some(uv),
            rgba: Some(rgba),
            rgba2: Some(rgba2),
            ..VertexWrite::default()
        });
    }

    /// Drops the last vertex, if any.
    pub fn remove_vertex(&mut self) {
        self.vertices_count = self.vertices_count.saturating_sub(1);
    }

    // ========================================================================
    // NORMALS
    // ========================================================================

    /// Appends an already packed normal.
    pub fn add_packed_normal(&mut self, packed: i32) {
        let len = self.normals.as_ref().map_or(0, Vec::len);
        if self.normals_count >= len {
            self.grow_normals_buffer(self.vertices_max.saturating_sub(len).max(1));
        }
        if let Some(normals) = &mut self.normals {
            normals[self.normals_count] = packed;
            self.normals_count += 1;
        }
    }

    /// Packs and appends a normal. Components are clamped to `[-1, 1]`.
    pub fn add_normal(&mut self, x: f32, y: f32, z: f32) {
        self.add_packed_normal(pack_normal(x, y, z));
    }

    /// Appends the normal of a block face.
    pub fn add_normal_facing(&mut self, facing: BlockFacing) {
        self.add_packed_normal(pack_normal_vec(facing.normal()));
    }

    // ========================================================================
    // INDICES
    // ========================================================================

    /// Appends one index.
    pub fn add_index(&mut self, index: u32) {
        if self.indices_count >= self.indices_max {
            self.grow_index_buffer(1);
        }
        self.indices[self.indices_count] = index;
        self.indices_count += 1;
    }

    /// Appends a run of indices.
    pub fn add_indices(&mut self, indices: &[u32]) {
        self.reserve_indices(indices.len());
        let start = self.indices_count;
        self.indices[start..start + indices.len()].copy_from_slice(indices);
        self.indices_count += indices.len();
    }

    /// Appends the two triangles of a quad whose first vertex is `first`.
    pub fn add_quad_indices(&mut self, first: u32) {
        self.add_indices(&[first, first + 1, first + 2, first, first + 2, first + 3]);
    }

    /// Drops the last index, if any.
    pub fn remove_index(&mut self) {
        self.indices_count = self.indices_count.saturating_sub(1);
    }

    // ========================================================================
    // PER-QUAD METADATA
    // ========================================================================

    fn grow_face_array<T: Copy>(array: &mut Vec<T>, count: usize, growth: usize, fill: T) {
        if count >= array.len() {
            let new_len = array.len() + growth;
            array.resize(new_len, fill);
        }
    }

    /// Appends a face index (see [`BlockFacing::index`]) for the next quad.
    pub fn add_xyz_face(&mut self, face: u8) {
        Self::grow_face_array(&mut self.xyz_faces, self.xyz_faces_count, self.face_growth, 0);
        self.xyz_faces[self.xyz_faces_count] = face;
        self.xyz_faces_count += 1;
    }

    /// Appends a climate tint index for the next quad.
    pub fn add_tint_index(&mut self, tint: i32) {
        Self::grow_face_array(&mut self.climate_tints, self.tints_count, self.face_growth, 0);
        self.climate_tints[self.tints_count] = tint;
        self.tints_count += 1;
    }

    /// Appends a render pass for the next quad; `None` stores the default tag.
    pub fn add_render_pass(&mut self, pass: Option<ChunkRenderPass>) {
        self.add_render_pass_tag(pass.map_or(DEFAULT_RENDER_PASS, ChunkRenderPass::id));
    }

    /// Appends a raw render pass tag for the next quad.
    pub fn add_render_pass_tag(&mut self, tag: i32) {
        Self::grow_face_array(
            &mut self.render_passes,
            self.render_pass_count,
            self.face_growth,
            DEFAULT_RENDER_PASS,
        );
        self.render_passes[self.render_pass_count] = tag;
        self.render_pass_count += 1;
    }

    /// Render pass tag of a quad, or the default tag when none was recorded.
    #[must_use]
    pub fn render_pass_of(&self, quad: usize) -> i32 {
        self.render_passes().get(quad).copied().unwrap_or(DEFAULT_RENDER_PASS)
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Resets every count to zero, keeping all allocations.
    pub fn clear(&mut self) -> &mut Self {
        self.vertices_count = 0;
        self.indices_count = 0;
        self.normals_count = 0;
        self.xyz_faces_count = 0;
        self.tints_count = 0;
        self.render_pass_count = 0;
        if let Some(part) = &mut self.custom_floats {
            part.clear();
        }
        if let Some(part) = &mut self.custom_ints {
            part.clear();
        }
        if let Some(part) = &mut self.custom_bytes {
            part.clear();
        }
        self
    }

    /// Bytes currently allocated by the built-in channels.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        use std::mem::size_of;
        self.xyz.len() * size_of::<f32>()
            + self.normals.as_ref().map_or(0, |n| n.len() * size_of::<i32>())
            + self.uv.as_ref().map_or(0, |uv| uv.len() * size_of::<f32>())
            + self.rgba.as_ref().map_or(0, Vec::len)
            + self.rgba2.as_ref().map_or(0, Vec::len)
            + self.flags.as_ref().map_or(0, |f| f.len() * size_of::<i32>())
            + self.indices.len() * size_of::<u32>()
    }
}

/// Deep copy of the valid data only.
///
/// The copy is packed: each channel holds exactly the valid prefix and the
/// capacities equal the counts, so the clone uploads identically and grows
/// on its next append.
impl Clone for MeshData {
    fn clone(&self) -> Self {
        let vc = self.vertices_count;
        let normals_len = vc.max(self.normals_count);
        Self {
            xyz: self.xyz().to_vec(),
            normals: self.normals.as_ref().map(|n| {
                let mut copy = n[..normals_len.min(n.len())].to_vec();
                copy.resize(normals_len, 0);
                copy
            }),
            uv: self.uv().map(<[f32]>::to_vec),
            rgba: self.rgba().map(<[u8]>::to_vec),
            rgba2: self.rgba2().map(<[u8]>::to_vec),
            flags: self.flags().map(<[i32]>::to_vec),
            indices: self.indices().to_vec(),
            xyz_faces: self.xyz_faces().to_vec(),
            climate_tints: self.climate_tints().to_vec(),
            render_passes: self.render_passes().to_vec(),
            custom_floats: self.custom_floats.as_ref().map(CustomFloats::clone_packed),
            custom_ints: self.custom_ints.as_ref().map(CustomInts::clone_packed),
            custom_bytes: self.custom_bytes.as_ref().map(CustomBytes::clone_packed),
            usage: self.usage,
            mode: self.mode,
            vertices_count: vc,
            vertices_max: vc,
            indices_count: self.indices_count,
            indices_max: self.indices_count,
            normals_count: self.normals_count,
            xyz_faces_count: self.xyz_faces_count,
            tints_count: self.tints_count,
            render_pass_count: self.render_pass_count,
            face_growth: self.face_growth,
        }
    }
}
