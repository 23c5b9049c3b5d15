//! # Tessera Attributes
//!
//! Typed key/value trees with a stable binary format, used for block entity
//! state, item stack data and network sync.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ATTRIBUTE TREES                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  TreeAttribute ── entries ──► Attribute (16 kinds)           │
//! │        │                           │                         │
//! │  AttributeWriter ◄── encode ───────┘                         │
//! │  AttributeReader ── decode ──► tag registry ──► Attribute    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - Decoding never panics; bad input is a [`DecodeError`]
//! - Trees nest at most [`MAX_DEPTH`] levels below the root
//! - The tag registry is sealed by the first decode
//! - Equality ignores entry order; encoding keeps it

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod attribute;
pub mod codec;
pub mod error;
pub mod itemstack;
pub mod registry;
pub mod tree;

pub use attribute::{Attribute, AttributeKind};
pub use codec::{AttributeReader, AttributeWriter};
pub use error::{AttributeError, AttributeResult, DecodeError, DecodeResult};
pub use itemstack::{ItemClass, ItemStack};
pub use registry::{is_registry_sealed, register_attribute, resolve_tag, seal_registry, AttributeRegistry};
pub use tree::{TreeAttribute, MAX_DEPTH};
