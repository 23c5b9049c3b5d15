//! # Custom Vertex Channels
//!
//! Mods attach extra per-vertex (or per-instance) data to a mesh through
//! typed side channels. Each channel owns a growable buffer plus the layout
//! hints the uploader needs to bind it.

use bytemuck::Pod;

/// Custom `f32` channel.
pub type CustomFloats = CustomMeshDataPart<f32>;
/// Custom `i32` channel.
pub type CustomInts = CustomMeshDataPart<i32>;
/// Custom `u8` channel.
pub type CustomBytes = CustomMeshDataPart<u8>;

/// A growable custom data channel.
///
/// `values().len() == count() <= buffer_size()` at all times.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomMeshDataPart<T> {
    values: Vec<T>,
    count: usize,
    allocation_size: Option<usize>,
    /// Component counts of each interleaved attribute.
    pub interleave_sizes: Option<Vec<usize>>,
    /// Byte stride between vertices; 0 when not interleaved.
    pub interleave_stride: usize,
    /// Byte offset of each interleaved attribute.
    pub interleave_offsets: Option<Vec<usize>>,
    /// Advance once per instance instead of once per vertex.
    pub instanced: bool,
    /// Upload once and never update.
    pub static_draw: bool,
    /// Byte offset into the uploader's buffer.
    pub base_offset: usize,
}

impl<T: Pod> Default for CustomMeshDataPart<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pod> CustomMeshDataPart<T> {
    /// Empty channel without a buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            count: 0,
            allocation_size: None,
            interleave_sizes: None,
            interleave_stride: 0,
            interleave_offsets: None,
            instanced: false,
            static_draw: true,
            base_offset: 0,
        }
    }

    /// Channel with a zeroed buffer of `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: vec![T::zeroed(); capacity],
            ..Self::new()
        }
    }

    /// Valid values.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values[..self.count]
    }

    /// Valid values, mutable.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values[..self.count]
    }

    /// Valid values as raw bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.values())
    }

    /// Number of valid values.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Allocated buffer length.
    #[inline]
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.values.len()
    }

    /// Size the uploader should allocate, in values.
    ///
    /// Falls back to [`Self::buffer_size`] unless pinned with
    /// [`Self::set_allocation_size`].
    #[must_use]
    pub fn allocation_size(&self) -> usize {
        self.allocation_size.unwrap_or(self.values.len())
    }

    /// Pins the upload allocation size.
    pub fn set_allocation_size(&mut self, size: usize) {
        self.allocation_size = Some(size);
    }

    /// Makes the upload allocation size follow the buffer again.
    pub fn auto_allocation_size(&mut self) {
        self.allocation_size = None;
    }

    /// Values consumed per vertex.
    ///
    /// Derived from the interleave stride when set, else from the summed
    /// interleave sizes, else 1.
    #[must_use]
    pub fn values_per_vertex(&self) -> usize {
        if self.interleave_stride > 0 {
            return (self.interleave_stride / std::mem::size_of::<T>()).max(1);
        }
        match &self.interleave_sizes {
            Some(sizes) if !sizes.is_empty() => sizes.iter().sum::<usize>().max(1),
            _ => 1,
        }
    }

    /// Grows the buffer by at least `min_increase`, doubling when larger.
    pub fn grow_buffer(&mut self, min_increase: usize) {
        let new_size = (self.values.len() + min_increase.max(1)).max(self.count * 2);
        self.values.resize(new_size, T::zeroed());
    }

    #[inline]
    fn reserve_values(&mut self, additional: usize) {
        let free = self.values.len() - self.count;
        if additional > free {
            self.grow_buffer(additional - free);
        }
    }

    /// Appends one value.
    pub fn add(&mut self, value: T) {
        self.reserve_values(1);
        self.values[self.count] = value;
        self.count += 1;
    }

    /// Appends two values.
    pub fn add2(&mut self, a: T, b: T) {
        self.add_slice(&[a, b]);
    }

    /// Appends four values.
    pub fn add4(&mut self, a: T, b: T, c: T, d: T) {
        self.add_slice(&[a, b, c, d]);
    }

    /// Appends a run of values.
    pub fn add_slice(&mut self, values: &[T]) {
        self.reserve_values(values.len());
        self.values[self.count..self.count + values.len()].copy_from_slice(values);
        self.count += values.len();
    }

    /// Drops all values, keeping the buffer.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Replaces contents and layout with a copy of `other`.
    pub fn set_from(&mut self, other: &Self) {
        self.values.clear();
        self.values.extend_from_slice(&other.values);
        self.count = other.count;
        self.allocation_size = other.allocation_size;
        self.interleave_sizes.clone_from(&other.interleave_sizes);
        self.interleave_stride = other.interleave_stride;
        self.interleave_offsets.clone_from(&other.interleave_offsets);
        self.instanced = other.instanced;
        self.static_draw = other.static_draw;
        self.base_offset = other.base_offset;
    }

    /// Copy holding only the valid values, with the same layout.
    #[must_use]
    pub fn clone_packed(&self) -> Self {
        Self {
            values: self.values().to_vec(),
            count: self.count,
            allocation_size: self.allocation_size,
            interleave_sizes: self.interleave_sizes.clone(),
            interleave_stride: self.interleave_stride,
            interleave_offsets: self.interleave_offsets.clone(),
            instanced: self.instanced,
            static_draw: self.static_draw,
            base_offset: self.base_offset,
        }
    }

    /// Layout-only copy with an empty buffer.
    #[must_use]
    pub fn empty_clone(&self) -> Self {
        Self {
            values: Vec::new(),
            count: 0,
            allocation_size: self.allocation_size,
            interleave_sizes: self.interleave_sizes.clone(),
            interleave_stride: self.interleave_stride,
            interleave_offsets: self.interleave_offsets.clone(),
            instanced: self.instanced,
            static_draw: self.static_draw,
            base_offset: self.base_offset,
        }
    }
}
