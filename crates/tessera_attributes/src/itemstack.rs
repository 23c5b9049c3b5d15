//! # Item Stacks
//!
//! A stack of one block or item type carrying its own attribute tree.
//! Encoded as `i32 class, i32 id, i32 stack size, tree`.

use serde::Serialize;

use crate::codec::{AttributeReader, AttributeWriter};
use crate::error::{DecodeError, DecodeResult};
use crate::registry::{decode_registry, AttributeRegistry};
use crate::tree::TreeAttribute;

/// Whether the stack holds a block or an item.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemClass {
    /// Placeable block.
    Block = 0,
    /// Item.
    Item = 1,
}

impl ItemClass {
    /// Decodes the wire value.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Block),
            1 => Some(Self::Item),
            _ => None,
        }
    }
}

/// Stack of a single collectible.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemStack {
    /// Block or item.
    pub class: ItemClass,
    /// Collectible id within its class.
    pub id: i32,
    /// Number of units in the stack.
    pub stack_size: i32,
    /// Per-stack attributes.
    pub attributes: TreeAttribute,
}

impl ItemStack {
    /// Stack with no attributes.
    #[must_use]
    pub const fn new(class: ItemClass, id: i32, stack_size: i32) -> Self {
        Self {
            class,
            id,
            stack_size,
            attributes: TreeAttribute::new(),
        }
    }

    /// Writes the stack.
    pub fn write_to(&self, writer: &mut AttributeWriter) {
        writer.write_i32(self.class as i32);
        writer.write_i32(self.id);
        writer.write_i32(self.stack_size);
        self.attributes.write_to(writer);
    }

    /// Decodes one stack from `reader`. Seals the tag registry.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; a class other than 0 or 1 is
    /// [`DecodeError::InvalidItemClass`].
    pub fn read_from(reader: &mut AttributeReader<'_>) -> DecodeResult<Self> {
        Self::decode(reader, &decode_registry(), 0)
    }

    /// `depth` is the depth of the tree holding the stack; its attributes
    /// sit one level below.
    pub(crate) fn decode(
        reader: &mut AttributeReader<'_>,
        registry: &AttributeRegistry,
        depth: usize,
    ) -> DecodeResult<Self> {
        let value = reader.read_i32()?;
        let class = ItemClass::from_i32(value).ok_or(DecodeError::InvalidItemClass { value })?;
        let id = reader.read_i32()?;
        let stack_size = reader.read_i32()?;
        let attributes = TreeAttribute::decode(reader, registry, depth + 1)?;
        Ok(Self {
            class,
            id,
            stack_size,
            attributes,
        })
    }

    /// Same collectible with equal attributes, skipping `ignore_paths`.
    /// Stack size is not compared.
    #[must_use]
    pub fn equals_ignoring(&self, other: &Self, ignore_paths: &[&str]) -> bool {
        self.class == other.class
            && self.id == other.id
            && self.attributes.equals_ignoring(&other.attributes, ignore_paths)
    }

    /// Same collectible whose attributes are a subset of `other`'s, so
    /// `self` can stand in for `other`.
    #[must_use]
    pub fn satisfies(&self, other: &Self) -> bool {
        self.class == other.class && self.id == other.id && self.attributes.is_subset_of(&other.attributes)
    }
}
