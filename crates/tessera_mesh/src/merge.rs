//! # Mesh Merging
//!
//! Appending one mesh onto another. Three flavours:
//!
//! - [`MeshData::add_mesh_data_filtered`]: copy only the quads of one render
//!   pass, rebasing each quad's indices onto the destination
//! - [`MeshData::add_mesh_data`]: copy everything, rebasing indices past the
//!   destination's last index
//! - [`MeshData::add_mesh_data_lit`]: copy everything with an integer block
//!   offset and a per-channel light multiplier applied to both colors
//!
//! The source is always read-only. Vertex channels absent in the
//! destination are skipped; channels absent in the source are written as
//! zero so the destination never ends up with half-written vertices.

use tessera_shared::scale_channel;

use crate::custom::CustomMeshDataPart;
use crate::draw::ChunkRenderPass;
use crate::mesh_data::{
    MeshData, VertexWrite, FLAGS_SIZE, QUAD_INDICES, QUAD_VERTICES, RGBA_SIZE, UV_SIZE, XYZ_SIZE,
};

/// Per-byte light multipliers for both color channels.
#[derive(Clone, Copy, Debug)]
struct Light {
    rgba: [u8; 4],
    rgba2: [u8; 4],
}

impl MeshData {
    /// Reads one source vertex as a write for this mesh.
    fn read_vertex(source: &Self, v: usize, offset: [f32; 3], light: Option<Light>) -> VertexWrite {
        let p = &source.xyz[v * XYZ_SIZE..(v + 1) * XYZ_SIZE];
        let xyz = [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]];

        let rgba = source.rgba.as_ref().map(|c| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&c[v * RGBA_SIZE..(v + 1) * RGBA_SIZE]);
            bytes
        });
        let rgba2 = source.rgba2.as_ref().map(|c| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&c[v * RGBA_SIZE..(v + 1) * RGBA_SIZE]);
            bytes
        });

        let (rgba, rgba2) = match light {
            None => (rgba, rgba2),
            Some(light) => {
                // Secondary color is lit from its own bytes, or from the
                // primary color when the source has none.
                let lit2 = rgba2.or(rgba).map(|c| scale_bytes(c, light.rgba2));
                (rgba.map(|c| scale_bytes(c, light.rgba)), lit2)
            }
        };

        VertexWrite {
            xyz,
            normal: Some(
                source
                    .normals()
                    .and_then(|n| n.get(v).copied())
                    .unwrap_or_default(),
            ),
            uv: source
                .uv
                .as_ref()
                .map(|uv| [uv[v * UV_SIZE], uv[v * UV_SIZE + 1]]),
            rgba,
            rgba2,
            flags: source.flags.as_ref().map(|f| f[v * FLAGS_SIZE]),
        }
    }

    fn copy_vertex(&mut self, source: &Self, v: usize, offset: [f32; 3], light: Option<Light>) {
        let write = Self::read_vertex(source, v, offset, light);
        self.push_vertex(&write);
        if self.normals.is_some() {
            // Merged vertices carry their own normal slot.
            self.normals_count = self.normals_count.max(self.vertices_count);
        }
    }

    /// Appends the source's metadata for one quad.
    fn copy_quad_face_data(&mut self, source: &Self, quad: usize) {
        if let Some(&face) = source.xyz_faces().get(quad) {
            self.add_xyz_face(face);
        }
        if let Some(&tint) = source.climate_tints().get(quad) {
            self.add_tint_index(tint);
        }
        if let Some(&pass) = source.render_passes().get(quad) {
            self.add_render_pass_tag(pass);
        }
    }

    /// Appends all of the source's per-quad arrays.
    fn copy_all_face_data(&mut self, source: &Self) {
        for &face in source.xyz_faces() {
            self.add_xyz_face(face);
        }
        for &tint in source.climate_tints() {
            self.add_tint_index(tint);
        }
        for &pass in source.render_passes() {
            self.add_render_pass_tag(pass);
        }
    }

    /// Appends every custom value of the source.
    fn copy_custom_all(&mut self, source: &Self) {
        append_part(&mut self.custom_floats, source.custom_floats.as_ref(), None);
        append_part(&mut self.custom_ints, source.custom_ints.as_ref(), None);
        append_part(&mut self.custom_bytes, source.custom_bytes.as_ref(), None);
    }

    /// Appends the custom values belonging to vertex `v` of the source.
    fn copy_custom_vertex(&mut self, source: &Self, v: usize) {
        append_part(&mut self.custom_floats, source.custom_floats.as_ref(), Some(v));
        append_part(&mut self.custom_ints, source.custom_ints.as_ref(), Some(v));
        append_part(&mut self.custom_bytes, source.custom_bytes.as_ref(), Some(v));
    }

    /// Index the next appended mesh starts at.
    ///
    /// Zero when there are no indices. Otherwise one past the last index,
    /// or one past the second-to-last for strip topologies, whose final
    /// index repeats a vertex.
    #[must_use]
    pub fn next_index_base(&self) -> u32 {
        let indices = self.indices();
        let last = if self.mode.is_strip() && indices.len() >= 2 {
            indices.get(indices.len() - 2)
        } else {
            indices.last()
        };
        last.map_or(0, |&i| i + 1)
    }

    /// Appends the quads of `source` that belong to `pass`.
    ///
    /// Quads without a recorded render pass count as default and are only
    /// taken for [`ChunkRenderPass::Opaque`]. Each copied quad's six indices
    /// are rebased from the source quad's first vertex to the destination's
    /// vertex count. Face, tint and render pass entries of copied quads come
    /// along, as do per-vertex custom values.
    pub fn add_mesh_data_filtered(&mut self, source: &Self, pass: ChunkRenderPass) {
        let quads = source.quad_count();
        for quad in 0..quads {
            if !pass.accepts(source.render_pass_of(quad)) {
                continue;
            }

            let Some(src) = source.indices().get(quad * QUAD_INDICES..(quad + 1) * QUAD_INDICES) else {
                tracing::warn!(
                    quad,
                    indices = source.indices_count,
                    "Source quad has no indices, stopping filtered merge"
                );
                break;
            };
            let Some(local) = quad_local_indices(src, dest_index(quad * QUAD_VERTICES)) else {
                tracing::warn!(quad, "Source quad indexes outside its own vertices, skipped");
                continue;
            };

            let base = dest_index(self.vertices_count);
            self.reserve_vertices(QUAD_VERTICES);
            for v in quad * QUAD_VERTICES..(quad + 1) * QUAD_VERTICES {
                self.copy_vertex(source, v, [0.0; 3], None);
                self.copy_custom_vertex(source, v);
            }

            self.reserve_indices(QUAD_INDICES);
            for index in local {
                self.add_index(base + index);
            }

            self.copy_quad_face_data(source, quad);
        }
    }

    /// Appends all of `source`.
    ///
    /// Source indices are offset by [`Self::next_index_base`]. Per-quad
    /// arrays are appended; custom channels are appended whole.
    pub fn add_mesh_data(&mut self, source: &Self) {
        let base = self.next_index_base();

        self.reserve_vertices(source.vertices_count);
        for v in 0..source.vertices_count {
            self.copy_vertex(source, v, [0.0; 3], None);
        }

        self.reserve_indices(source.indices_count);
        for &index in source.indices() {
            self.add_index(base.wrapping_add(index));
        }

        self.copy_all_face_data(source);
        self.copy_custom_all(source);
    }

    /// Appends all of `source`, shifted by a block offset and lit.
    ///
    /// Each color byte is scaled by the matching byte of the packed
    /// multiplier (`value * mul / 255`). The secondary color uses
    /// `light_multiply2`. Indices are offset by this mesh's vertex count
    /// before the append.
    pub fn add_mesh_data_lit(
        &mut self,
        source: &Self,
        offset: [i32; 3],
        light_multiply: u32,
        light_multiply2: u32,
    ) {
        #[allow(clippy::cast_precision_loss)]
        let offset = [offset[0] as f32, offset[1] as f32, offset[2] as f32];
        let light = Light {
            rgba: light_multiply.to_le_bytes(),
            rgba2: light_multiply2.to_le_bytes(),
        };
        let base = dest_index(self.vertices_count);

        self.reserve_vertices(source.vertices_count);
        for v in 0..source.vertices_count {
            self.copy_vertex(source, v, offset, Some(light));
        }

        self.reserve_indices(source.indices_count);
        for &index in source.indices() {
            self.add_index(base.wrapping_add(index));
        }

        self.copy_all_face_data(source);
        self.copy_custom_all(source);
    }
}

#[inline]
fn scale_bytes(color: [u8; 4], mul: [u8; 4]) -> [u8; 4] {
    [
        scale_channel(color[0], mul[0]),
        scale_channel(color[1], mul[1]),
        scale_channel(color[2], mul[2]),
        scale_channel(color[3], mul[3]),
    ]
}

/// Rebases a quad's indices onto its first vertex. `None` when any index
/// falls outside the quad's four vertices.
fn quad_local_indices(indices: &[u32], first: u32) -> Option<[u32; QUAD_INDICES]> {
    let mut local = [0; QUAD_INDICES];
    for (slot, &index) in local.iter_mut().zip(indices) {
        *slot = index.checked_sub(first).filter(|&l| (l as usize) < QUAD_VERTICES)?;
    }
    Some(local)
}

/// Vertex position as an index value. Meshes are bounded well below `u32`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn dest_index(vertex: usize) -> u32 {
    vertex as u32
}

/// Appends values from `source` onto `dest` when both channels exist.
///
/// With a vertex, only that vertex's `values_per_vertex` run is copied;
/// runs outside the source's values (per-instance data) are skipped.
fn append_part<T: bytemuck::Pod>(
    dest: &mut Option<CustomMeshDataPart<T>>,
    source: Option<&CustomMeshDataPart<T>>,
    vertex: Option<usize>,
) {
    let (Some(dest), Some(source)) = (dest.as_mut(), source) else {
        return;
    };
    match vertex {
        None => dest.add_slice(source.values()),
        Some(v) => {
            let per_vertex = source.values_per_vertex();
            let start = v * per_vertex;
            if let Some(run) = source.values().get(start..start + per_vertex) {
                dest.add_slice(run);
            }
        }
    }
}
