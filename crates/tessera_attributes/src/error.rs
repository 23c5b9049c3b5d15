//! # Attribute Error Types
//!
//! Lookups never fail (a missing or mistyped key is `None`). Errors come
//! from two places only: decoding bytes and editing the tag registry.

use thiserror::Error;

/// Errors raised while decoding the binary format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Stream ended in the middle of a value.
    #[error("unexpected end of stream at offset {offset}: needed {needed} bytes, {remaining} left")]
    UnexpectedEof {
        /// Read position.
        offset: usize,
        /// Bytes the value needed.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },

    /// Tag with no registered variant.
    #[error("unknown attribute tag {tag} at offset {offset}")]
    UnknownTag {
        /// The tag byte.
        tag: u8,
        /// Offset of the tag byte.
        offset: usize,
    },

    /// String bytes are not UTF-8.
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the string payload.
        offset: usize,
    },

    /// Array or byte count below zero.
    #[error("negative length {length} at offset {offset}")]
    NegativeLength {
        /// The decoded count.
        length: i32,
        /// Offset of the count.
        offset: usize,
    },

    /// Array or string larger than what is left in the stream.
    #[error("length {length} at offset {offset} exceeds the {remaining} bytes left")]
    LengthTooLarge {
        /// Declared length in bytes.
        length: usize,
        /// Offset of the length prefix.
        offset: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },

    /// 7-bit length prefix ran past five bytes.
    #[error("malformed 7-bit length prefix at offset {offset}")]
    MalformedLength {
        /// Offset of the prefix.
        offset: usize,
    },

    /// Item class other than block or item.
    #[error("invalid item class {value}")]
    InvalidItemClass {
        /// The decoded class value.
        value: i32,
    },

    /// Trees nested deeper than the decoder allows.
    #[error("tree nesting exceeds maximum depth of {max}")]
    DepthExceeded {
        /// The limit.
        max: usize,
    },

    /// Bytes left over after a complete tree.
    #[error("{remaining} trailing bytes after tree")]
    TrailingBytes {
        /// Unread bytes.
        remaining: usize,
    },
}

/// Errors raised by the attribute tag registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// Decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Tag 0 terminates a tree and cannot name a variant.
    #[error("attribute tag 0 is reserved as the tree terminator")]
    ReservedTag,

    /// Registration attempted after the registry was sealed.
    #[error("attribute registry is sealed; cannot register tag {tag}")]
    RegistrySealed {
        /// The rejected tag.
        tag: u8,
    },

    /// Tag already maps to a different variant.
    #[error("attribute tag {tag} is already registered as {existing}")]
    TagConflict {
        /// The contested tag.
        tag: u8,
        /// Variant name already registered.
        existing: &'static str,
    },
}

/// Result alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result alias for registry operations.
pub type AttributeResult<T> = Result<T, AttributeError>;
