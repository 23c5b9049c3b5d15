//! Draw modes and chunk render passes.

/// Render pass tag meaning "no explicit pass"; treated as opaque.
pub const DEFAULT_RENDER_PASS: i32 = -1;

/// Primitive topology of a mesh.
///
/// Affects how the "last index" is read when whole meshes are appended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Independent triangles, three indices each.
    #[default]
    Triangles,
    /// Independent line segments.
    Lines,
    /// Connected line segments.
    LineStrip,
    /// Triangle strip.
    TriangleStrip,
}

impl DrawMode {
    /// True for strip topologies, where the final index repeats a vertex.
    #[inline]
    #[must_use]
    pub const fn is_strip(self) -> bool {
        matches!(self, Self::LineStrip | Self::TriangleStrip)
    }
}

/// Render pass a chunk quad is drawn in.
///
/// Stored per quad as an `i32`; [`DEFAULT_RENDER_PASS`] (-1) marks quads
/// without an explicit pass.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkRenderPass {
    /// Backface culled, no blending.
    Opaque = 0,
    /// No culling, no blending.
    OpaqueNoCull = 1,
    /// No culling, alpha blended.
    BlendNoCull = 2,
    /// Sorted transparent geometry.
    Transparent = 3,
    /// Water and other liquids.
    Liquid = 4,
    /// Grass tops and similar overlay geometry.
    TopSoil = 5,
    /// Debug and meta geometry.
    Meta = 6,
}

impl ChunkRenderPass {
    /// All passes in id order.
    pub const ALL: [Self; 7] = [
        Self::Opaque,
        Self::OpaqueNoCull,
        Self::BlendNoCull,
        Self::Transparent,
        Self::Liquid,
        Self::TopSoil,
        Self::Meta,
    ];

    /// Stored tag value.
    #[inline]
    #[must_use]
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Pass for a stored tag. The default tag resolves to `Opaque`.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            DEFAULT_RENDER_PASS | 0 => Some(Self::Opaque),
            1 => Some(Self::OpaqueNoCull),
            2 => Some(Self::BlendNoCull),
            3 => Some(Self::Transparent),
            4 => Some(Self::Liquid),
            5 => Some(Self::TopSoil),
            6 => Some(Self::Meta),
            _ => None,
        }
    }

    /// Whether a quad tagged `stored` belongs in this pass.
    ///
    /// Untagged quads belong to `Opaque` only.
    #[inline]
    #[must_use]
    pub const fn accepts(self, stored: i32) -> bool {
        stored == self.id() || (stored == DEFAULT_RENDER_PASS && matches!(self, Self::Opaque))
    }
}
