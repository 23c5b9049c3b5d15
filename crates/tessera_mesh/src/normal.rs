//! # Packed Normals
//!
//! Normals are stored one `i32` per vertex in the signed 2_10_10_10 layout
//! (`GL_INT_2_10_10_10_REV`): x in bits 0-9, y in bits 10-19, z in bits
//! 20-29, each a two's complement value in `-511..=511` mapping to
//! `-1.0..=1.0`. The top two bits (w) are always zero.

use glam::Vec3;

/// Magnitude of a unit component once packed.
pub const NORMAL_SCALE: f32 = 511.0;

const COMPONENT_MASK: i32 = 0x3ff;

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn pack_component(value: f32) -> i32 {
    let value = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
    ((value * NORMAL_SCALE).round() as i32) & COMPONENT_MASK
}

/// Packs a direction into 2_10_10_10. Components are clamped to `[-1, 1]`.
#[inline]
#[must_use]
pub fn pack_normal(x: f32, y: f32, z: f32) -> i32 {
    pack_component(x) | (pack_component(y) << 10) | (pack_component(z) << 20)
}

/// Packs a vector into 2_10_10_10.
#[inline]
#[must_use]
pub fn pack_normal_vec(normal: Vec3) -> i32 {
    pack_normal(normal.x, normal.y, normal.z)
}

/// Unpacks a 2_10_10_10 normal. Each component is sign-extended from its
/// 10 bits.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unpack_normal(packed: i32) -> Vec3 {
    let x = (packed << 22) >> 22;
    let y = (packed << 12) >> 22;
    let z = (packed << 2) >> 22;
    Vec3::new(x as f32, y as f32, z as f32) / NORMAL_SCALE
}
