//! # Block Facings
//!
//! The six axis-aligned face directions of a block. Meshes record one facing
//! index per quad so lighting can be looked up per face; after a rotation the
//! index is re-derived with [`BlockFacing::from_vector`].

use glam::Vec3;

/// Axis-aligned face direction.
///
/// The discriminant is the stable face index stored in mesh buffers.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockFacing {
    /// Towards -Z.
    North = 0,
    /// Towards +X.
    East = 1,
    /// Towards +Z.
    South = 2,
    /// Towards -X.
    West = 3,
    /// Towards +Y.
    Up = 4,
    /// Towards -Y.
    Down = 5,
}

impl BlockFacing {
    /// All facings in index order.
    pub const ALL: [Self; 6] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::Up,
        Self::Down,
    ];

    /// Face index (0-5).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Facing for a face index, `None` if out of range.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::South),
            3 => Some(Self::West),
            4 => Some(Self::Up),
            5 => Some(Self::Down),
            _ => None,
        }
    }

    /// Unit normal of this face.
    #[inline]
    #[must_use]
    pub const fn normal(self) -> Vec3 {
        match self {
            Self::North => Vec3::new(0.0, 0.0, -1.0),
            Self::East => Vec3::new(1.0, 0.0, 0.0),
            Self::South => Vec3::new(0.0, 0.0, 1.0),
            Self::West => Vec3::new(-1.0, 0.0, 0.0),
            Self::Up => Vec3::new(0.0, 1.0, 0.0),
            Self::Down => Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Nearest facing to an arbitrary direction.
    ///
    /// Picks the facing whose normal has the largest dot product with the
    /// vector. Ties resolve to the lower index; the zero vector maps to
    /// [`BlockFacing::North`].
    #[must_use]
    pub fn from_vector(x: f32, y: f32, z: f32) -> Self {
        let dir = Vec3::new(x, y, z);
        let mut best = Self::North;
        let mut best_dot = f32::NEG_INFINITY;

        for facing in Self::ALL {
            let dot = facing.normal().dot(dir);
            if dot > best_dot {
                best_dot = dot;
                best = facing;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for facing in BlockFacing::ALL {
            assert_eq!(BlockFacing::from_index(facing.index()), Some(facing));
        }
        assert_eq!(BlockFacing::from_index(6), None);
    }

    #[test]
    fn test_from_vector_exact_normals() {
        for facing in BlockFacing::ALL {
            let n = facing.normal();
            assert_eq!(BlockFacing::from_vector(n.x, n.y, n.z), facing);
        }
    }

    #[test]
    fn test_from_vector_nearest() {
        assert_eq!(BlockFacing::from_vector(0.9, 0.3, -0.1), BlockFacing::East);
        assert_eq!(BlockFacing::from_vector(0.1, -0.8, 0.4), BlockFacing::Down);
        assert_eq!(BlockFacing::from_vector(0.0, 0.0, 0.0), BlockFacing::North);
    }

    #[test]
    fn test_normals_are_unit_axes() {
        for facing in BlockFacing::ALL {
            let n = facing.normal();
            assert!((n.length() - 1.0).abs() < f32::EPSILON);
            assert!((n.abs().max_element() - 1.0).abs() < f32::EPSILON);
        }
    }
}
