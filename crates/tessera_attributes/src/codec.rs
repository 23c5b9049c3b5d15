//! # Attribute Codec
//!
//! Little-endian primitive reader and writer for the attribute wire format.
//!
//! ## Format
//!
//! - Integers and floats: fixed width, little-endian
//! - Bool: one byte, nonzero is true
//! - String: 7-bit variable-length byte count, then UTF-8 bytes
//! - Counts: `i32`, never negative
//!
//! The reader never panics. Every read checks the remaining length first and
//! counts are checked against the bytes left before anything is allocated,
//! so a hostile length prefix cannot trigger a huge allocation.

use crate::error::{DecodeError, DecodeResult};

/// Growable output buffer.
#[derive(Debug, Default, Clone)]
pub struct AttributeWriter {
    buffer: Vec<u8>,
}

impl AttributeWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates a writer with preallocated space.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Clears written bytes, keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Written bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes a bool as one byte.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(u8::from(value));
    }

    /// Writes an i32 in little-endian format.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an i64 in little-endian format.
    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an f32 in little-endian format.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an f64 in little-endian format.
    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw bytes without a length prefix.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes an element count as `i32`.
    ///
    /// Collections are far below `i32::MAX` elements; larger counts are
    /// clamped.
    #[inline]
    pub fn write_len(&mut self, len: usize) {
        self.write_i32(i32::try_from(len).unwrap_or(i32::MAX));
    }

    /// Writes an unsigned value in 7-bit groups, low group first, high bit
    /// set on every byte except the last.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_7bit(&mut self, mut value: u32) {
        while value >= 0x80 {
            // Low seven bits plus the continuation bit.
            self.buffer.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buffer.push(value as u8);
    }

    /// Writes a string: 7-bit byte count, then UTF-8.
    pub fn write_string(&mut self, value: &str) {
        self.write_7bit(u32::try_from(value.len()).unwrap_or(u32::MAX));
        self.buffer.extend_from_slice(value.as_bytes());
    }
}

/// Cursor over an input buffer.
#[derive(Debug, Clone)]
pub struct AttributeReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> AttributeReader<'a> {
    /// Creates a reader at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Current read offset.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Returns true when every byte has been read.
    #[inline]
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Takes the next `len` bytes.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if fewer bytes are left.
    pub fn read_raw(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.position,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buffer[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.read_raw(N)?);
        Ok(bytes)
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at the end of the stream.
    #[inline]
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a bool; any nonzero byte is true.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at the end of the stream.
    #[inline]
    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads an i32 in little-endian format.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if fewer than 4 bytes are left.
    #[inline]
    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads an i64 in little-endian format.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if fewer than 8 bytes are left.
    #[inline]
    pub fn read_i64(&mut self) -> DecodeResult<i64> {
        self.read_array().map(i64::from_le_bytes)
    }

    /// Reads an f32 in little-endian format.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if fewer than 4 bytes are left.
    #[inline]
    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Reads an f64 in little-endian format.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if fewer than 8 bytes are left.
    #[inline]
    pub fn read_f64(&mut self) -> DecodeResult<f64> {
        self.read_array().map(f64::from_le_bytes)
    }

    /// Reads an `i32` element count and checks that `count * min_element_size`
    /// bytes are still available.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NegativeLength`] or [`DecodeError::LengthTooLarge`].
    pub fn read_len(&mut self, min_element_size: usize) -> DecodeResult<usize> {
        let offset = self.position;
        let length = self.read_i32()?;
        let count = usize::try_from(length)
            .map_err(|_| DecodeError::NegativeLength { length, offset })?;
        let bytes = count.saturating_mul(min_element_size);
        if bytes > self.remaining() {
            return Err(DecodeError::LengthTooLarge {
                length: bytes,
                offset,
                remaining: self.remaining(),
            });
        }
        Ok(count)
    }

    /// Reads a 7-bit variable-length unsigned value (at most five bytes).
    ///
    /// # Errors
    ///
    /// [`DecodeError::MalformedLength`] if the value runs past five bytes.
    pub fn read_7bit(&mut self) -> DecodeResult<u32> {
        let offset = self.position;
        let mut value = 0u32;
        for group in 0..5 {
            let byte = self.read_u8()?;
            if group == 4 && byte > 0x0f {
                return Err(DecodeError::MalformedLength { offset });
            }
            value |= u32::from(byte & 0x7f) << (7 * group);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::MalformedLength { offset })
    }

    /// Reads a string: 7-bit byte count, then UTF-8.
    ///
    /// # Errors
    ///
    /// [`DecodeError::LengthTooLarge`] if the count exceeds the stream,
    /// [`DecodeError::InvalidUtf8`] on bad bytes.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let offset = self.position;
        let len = self.read_7bit()? as usize;
        if len > self.remaining() {
            return Err(DecodeError::LengthTooLarge {
                length: len,
                offset,
                remaining: self.remaining(),
            });
        }
        let payload = self.position;
        let bytes = self.read_raw(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { offset: payload })
    }
}
