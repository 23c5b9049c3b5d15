//! # Model Transforms
//!
//! Authoring-side description of how a shape is placed: translation,
//! rotation in degrees around an origin, and per-axis scale.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Degrees to radians.
pub const DEG2RAD: f32 = std::f32::consts::PI / 180.0;

/// Translation, rotation and scale applied around an origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTransform {
    /// Offset applied last.
    pub translation: Vec3,
    /// Euler angles in degrees, applied X then Y then Z.
    pub rotation: Vec3,
    /// Pivot for rotation and scale.
    pub origin: Vec3,
    /// Per-axis scale.
    pub scale_xyz: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::NO_TRANSFORM
    }
}

impl ModelTransform {
    /// Identity placement with the pivot at the block center.
    pub const NO_TRANSFORM: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        origin: Vec3::new(0.5, 0.5, 0.5),
        scale_xyz: Vec3::ONE,
    };

    /// Sets a uniform scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale_xyz = Vec3::new(scale, scale, scale);
        self
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Composes the transform into one matrix.
    ///
    /// Order: translate, move to origin, rotate X, rotate Y, rotate Z,
    /// scale, move back from origin.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_translation(self.origin)
            * Mat4::from_rotation_x(self.rotation.x * DEG2RAD)
            * Mat4::from_rotation_y(self.rotation.y * DEG2RAD)
            * Mat4::from_rotation_z(self.rotation.z * DEG2RAD)
            * Mat4::from_scale(self.scale_xyz)
            * Mat4::from_translation(-self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_matrix() {
        let m = ModelTransform::default().to_matrix();
        let p = Vec3::new(0.25, 0.75, 1.0);
        assert!(approx(m.transform_point3(p), p));
    }

    #[test]
    fn test_rotation_about_block_center() {
        // 90 degrees around Y keeps the center fixed and turns +X into -Z.
        let m = ModelTransform::default()
            .with_rotation(Vec3::new(0.0, 90.0, 0.0))
            .to_matrix();
        assert!(approx(m.transform_point3(Vec3::splat(0.5)), Vec3::splat(0.5)));
        assert!(approx(
            m.transform_point3(Vec3::new(1.0, 0.5, 0.5)),
            Vec3::new(0.5, 0.5, 0.0)
        ));
    }

    #[test]
    fn test_scale_then_translate() {
        let m = ModelTransform::default()
            .with_scale(2.0)
            .with_translation(Vec3::new(1.0, 0.0, 0.0))
            .to_matrix();
        // (1,1,1) is 0.5 from the origin on each axis, scaled to 1.0.
        assert!(approx(
            m.transform_point3(Vec3::ONE),
            Vec3::new(2.5, 1.5, 1.5)
        ));
    }

    #[test]
    fn test_serde_defaults() {
        let parsed: ModelTransform =
            serde_json::from_str(r#"{ "rotation": [0.0, 45.0, 0.0] }"#).unwrap();
        assert_eq!(parsed.origin, Vec3::splat(0.5));
        assert_eq!(parsed.scale_xyz, Vec3::ONE);
        assert_eq!(parsed.rotation.y, 45.0);
    }
}
