//! # Packed Colors
//!
//! Colors travel through the engine as a single `u32` and land in vertex
//! buffers as four bytes.
//!
//! ## Byte Order
//!
//! The packed word is **little-endian RGBA**: red in bits 0-7, green in
//! bits 8-15, blue in bits 16-23 and alpha in bits 24-31. Splitting the word
//! into a vertex buffer therefore yields `[r, g, b, a]`, which is the layout
//! the shaders read as `Unorm8x4`. Conversion is done with shifts, never by
//! reinterpreting memory, so the result does not depend on the host CPU.

/// Opaque white.
pub const WHITE_RGBA: u32 = color_from_rgba(255, 255, 255, 255);

/// Packs four channels into one word.
#[inline]
#[must_use]
pub const fn color_from_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

/// Splits a packed color into buffer order `[r, g, b, a]`.
#[inline]
#[must_use]
pub const fn to_rgba_bytes(color: u32) -> [u8; 4] {
    [
        (color & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        ((color >> 16) & 0xff) as u8,
        ((color >> 24) & 0xff) as u8,
    ]
}

/// Scales one 8-bit channel by an 8-bit multiplier: `value * mul / 255`.
#[inline]
#[must_use]
pub const fn scale_channel(value: u8, multiplier: u8) -> u8 {
    ((value as u32 * multiplier as u32) / 255) as u8
}
