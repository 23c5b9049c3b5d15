//! # Mesh Transforms
//!
//! In-place affine transforms over the valid vertices. Positions are
//! transformed as points, packed normals as directions (renormalized and
//! repacked), and per-quad face indices are re-derived from their rotated
//! face normal. Each transform returns `&mut Self` for chaining.

use glam::{DMat4, DVec3, Mat4, Vec3};
use tessera_shared::{BlockFacing, ModelTransform};

use crate::mesh_data::{MeshData, XYZ_SIZE};
use crate::normal::{pack_normal_vec, unpack_normal};

impl MeshData {
    /// Offsets every valid vertex.
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        for p in self.xyz_mut().chunks_exact_mut(XYZ_SIZE) {
            p[0] += offset.x;
            p[1] += offset.y;
            p[2] += offset.z;
        }
        self
    }

    /// Offsets every valid vertex by components.
    pub fn translate_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.translate(Vec3::new(x, y, z))
    }

    /// Rotates around `origin`, applying X, then Y, then Z (radians).
    pub fn rotate(&mut self, origin: Vec3, rad_x: f32, rad_y: f32, rad_z: f32) -> &mut Self {
        let matrix = Mat4::from_translation(origin)
            * Mat4::from_rotation_x(rad_x)
            * Mat4::from_rotation_y(rad_y)
            * Mat4::from_rotation_z(rad_z)
            * Mat4::from_translation(-origin);
        self.matrix_transform(&matrix)
    }

    /// Scales positions around `origin`. Normals and face indices are left
    /// alone.
    pub fn scale(&mut self, origin: Vec3, scale_x: f32, scale_y: f32, scale_z: f32) -> &mut Self {
        let scale = Vec3::new(scale_x, scale_y, scale_z);
        for p in self.xyz_mut().chunks_exact_mut(XYZ_SIZE) {
            let scaled = (Vec3::new(p[0], p[1], p[2]) - origin) * scale + origin;
            p.copy_from_slice(&scaled.to_array());
        }
        self
    }

    /// Applies a model placement. See [`ModelTransform::to_matrix`].
    pub fn model_transform(&mut self, transform: &ModelTransform) -> &mut Self {
        self.matrix_transform(&transform.to_matrix())
    }

    /// Applies a single-precision matrix.
    pub fn matrix_transform(&mut self, matrix: &Mat4) -> &mut Self {
        for p in self.xyz_mut().chunks_exact_mut(XYZ_SIZE) {
            let moved = matrix.transform_point3(Vec3::new(p[0], p[1], p[2]));
            p.copy_from_slice(&moved.to_array());
        }

        self.transform_normals(|n| matrix.transform_vector3(n));
        self.rederive_faces(|n| matrix.transform_vector3(n));
        self
    }

    /// Applies a double-precision matrix. Positions are widened for the
    /// multiply and narrowed back.
    #[allow(clippy::cast_possible_truncation)]
    pub fn matrix_transform_f64(&mut self, matrix: &DMat4) -> &mut Self {
        for p in self.xyz_mut().chunks_exact_mut(XYZ_SIZE) {
            let pos = DVec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]));
            let moved = matrix.transform_point3(pos);
            p[0] = moved.x as f32;
            p[1] = moved.y as f32;
            p[2] = moved.z as f32;
        }

        let narrow = |n: Vec3| matrix.transform_vector3(n.as_dvec3()).as_vec3();
        self.transform_normals(narrow);
        self.rederive_faces(narrow);
        self
    }

    fn transform_normals(&mut self, direction: impl Fn(Vec3) -> Vec3) {
        let count = self.vertices_count;
        if let Some(normals) = &mut self.normals {
            let valid = count.min(normals.len());
            for packed in &mut normals[..valid] {
                let turned = direction(unpack_normal(*packed)).normalize_or_zero();
                *packed = pack_normal_vec(turned);
            }
        }
    }

    fn rederive_faces(&mut self, direction: impl Fn(Vec3) -> Vec3) {
        let count = self.xyz_faces_count;
        for face in &mut self.xyz_faces[..count] {
            if let Some(facing) = BlockFacing::from_index(usize::from(*face)) {
                let n = direction(facing.normal());
                // Face indices are 0..6, always fits.
                #[allow(clippy::cast_possible_truncation)]
                let index = BlockFacing::from_vector(n.x, n.y, n.z).index() as u8;
                *face = index;
            }
        }
    }
}
