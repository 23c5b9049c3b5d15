//! # Tree Attribute
//!
//! Ordered map from string key to [`Attribute`]. Insertion order is kept
//! for iteration and encoding; equality ignores it.
//!
//! ## Wire layout
//!
//! ```text
//! ┌─────┬────────────┬─────────┐     ┌─────┐
//! │ tag │ key (str)  │ payload │ ... │  0  │
//! └─────┴────────────┴─────────┘     └─────┘
//! ```
//!
//! Nested trees may go [`MAX_DEPTH`] levels below the root. Anything deeper
//! is a decode error.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tessera_shared::glam::Vec3;
use tessera_shared::ModelTransform;

use crate::attribute::Attribute;
use crate::codec::{AttributeReader, AttributeWriter};
use crate::error::{DecodeError, DecodeResult};
use crate::itemstack::ItemStack;
use crate::registry::{decode_registry, AttributeRegistry};

/// Deepest nesting level accepted by the decoder. The root is level 0.
pub const MAX_DEPTH: usize = 30;

/// Ordered, typed key/value tree.
#[derive(Clone, Default)]
pub struct TreeAttribute {
    entries: Vec<(String, Attribute)>,
}

impl TreeAttribute {
    /// Empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of `key` in insertion order.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// True when `key` is present.
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Attribute> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Stores `value` under `key`. An existing key keeps its position and
    /// its previous value is returned.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Attribute>) -> Option<Attribute> {
        let key = key.into();
        let value = value.into();
        if let Some(index) = self.index_of(&key) {
            Some(std::mem::replace(&mut self.entries[index].1, value))
        } else {
            self.entries.push((key, value));
            None
        }
    }

    /// Removes `key`, keeping the order of the rest.
    pub fn remove_attribute(&mut self, key: &str) -> Option<Attribute> {
        let index = self.index_of(key)?;
        Some(self.entries.remove(index).1)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ========================================================================
    // TYPED SETTERS
    // ========================================================================

    /// Stores an `i32`.
    pub fn set_int(&mut self, key: impl Into<String>, value: i32) {
        self.set_attribute(key, Attribute::Int(value));
    }

    /// Stores an `i64`.
    pub fn set_long(&mut self, key: impl Into<String>, value: i64) {
        self.set_attribute(key, Attribute::Long(value));
    }

    /// Stores an `f64`.
    pub fn set_double(&mut self, key: impl Into<String>, value: f64) {
        self.set_attribute(key, Attribute::Double(value));
    }

    /// Stores an `f32`.
    pub fn set_float(&mut self, key: impl Into<String>, value: f32) {
        self.set_attribute(key, Attribute::Float(value));
    }

    /// Stores a string.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set_attribute(key, Attribute::String(value.into()));
    }

    /// Stores a bool.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set_attribute(key, Attribute::Bool(value));
    }

    /// Stores raw bytes.
    pub fn set_bytes(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.set_attribute(key, Attribute::ByteArray(value.into()));
    }

    /// Stores a nested tree.
    pub fn set_tree(&mut self, key: impl Into<String>, value: Self) {
        self.set_attribute(key, Attribute::Tree(value));
    }

    /// Stores an item stack slot.
    pub fn set_itemstack(&mut self, key: impl Into<String>, value: Option<ItemStack>) {
        self.set_attribute(key, Attribute::Itemstack(value));
    }

    /// Stores `i32`s.
    pub fn set_int_array(&mut self, key: impl Into<String>, value: Vec<i32>) {
        self.set_attribute(key, Attribute::IntArray(value));
    }

    /// Stores `i64`s.
    pub fn set_long_array(&mut self, key: impl Into<String>, value: Vec<i64>) {
        self.set_attribute(key, Attribute::LongArray(value));
    }

    /// Stores `f32`s.
    pub fn set_float_array(&mut self, key: impl Into<String>, value: Vec<f32>) {
        self.set_attribute(key, Attribute::FloatArray(value));
    }

    /// Stores `f64`s.
    pub fn set_double_array(&mut self, key: impl Into<String>, value: Vec<f64>) {
        self.set_attribute(key, Attribute::DoubleArray(value));
    }

    /// Stores `bool`s.
    pub fn set_bool_array(&mut self, key: impl Into<String>, value: Vec<bool>) {
        self.set_attribute(key, Attribute::BoolArray(value));
    }

    /// Stores strings.
    pub fn set_string_array(&mut self, key: impl Into<String>, value: Vec<String>) {
        self.set_attribute(key, Attribute::StringArray(value));
    }

    /// Stores trees.
    pub fn set_tree_array(&mut self, key: impl Into<String>, value: Vec<Self>) {
        self.set_attribute(key, Attribute::TreeArray(value));
    }

    // ========================================================================
    // TYPED GETTERS
    // ========================================================================
    // A missing key and a key of another variant both read as absent.

    /// `i32` under `key`.
    #[must_use]
    pub fn try_get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            Attribute::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// `i32` under `key`, or `default`.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.try_get_int(key).unwrap_or(default)
    }

    /// `i64` under `key`.
    #[must_use]
    pub fn try_get_long(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Attribute::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// `i64` under `key`, or `default`.
    #[must_use]
    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        self.try_get_long(key).unwrap_or(default)
    }

    /// `f64` under `key`.
    #[must_use]
    pub fn try_get_double(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Attribute::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// `f64` under `key`, or `default`.
    #[must_use]
    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        self.try_get_double(key).unwrap_or(default)
    }

    /// `f32` under `key`.
    #[must_use]
    pub fn try_get_float(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            Attribute::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// `f32` under `key`, or `default`.
    #[must_use]
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        self.try_get_float(key).unwrap_or(default)
    }

    /// `bool` under `key`.
    #[must_use]
    pub fn try_get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Attribute::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// `bool` under `key`, or `default`.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.try_get_bool(key).unwrap_or(default)
    }

    /// String under `key`.
    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Attribute::String(v) => Some(v),
            _ => None,
        }
    }

    /// String under `key`, or `default`.
    #[must_use]
    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_string(key).unwrap_or(default)
    }

    /// Bytes under `key`.
    #[must_use]
    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.get(key)? {
            Attribute::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    /// Nested tree under `key`.
    #[must_use]
    pub fn get_tree_attribute(&self, key: &str) -> Option<&Self> {
        match self.get(key)? {
            Attribute::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Mutable nested tree under `key`.
    pub fn get_tree_attribute_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self.get_mut(key)? {
            Attribute::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Nested tree under `key`, inserting an empty one when the key is
    /// missing or holds another variant.
    pub fn get_or_add_tree_attribute(&mut self, key: &str) -> &mut Self {
        let index = if let Some(index) = self.index_of(key) {
            index
        } else {
            self.entries.push((key.to_owned(), Attribute::Tree(Self::new())));
            self.entries.len() - 1
        };

        tree_in_slot(&mut self.entries[index].1)
    }

    /// Item stack under `key`. An empty slot reads as `None`.
    #[must_use]
    pub fn get_itemstack(&self, key: &str) -> Option<&ItemStack> {
        match self.get(key)? {
            Attribute::Itemstack(stack) => stack.as_ref(),
            _ => None,
        }
    }

    /// `i32`s under `key`.
    #[must_use]
    pub fn get_int_array(&self, key: &str) -> Option<&[i32]> {
        match self.get(key)? {
            Attribute::IntArray(v) => Some(v),
            _ => None,
        }
    }

    /// `i64`s under `key`.
    #[must_use]
    pub fn get_long_array(&self, key: &str) -> Option<&[i64]> {
        match self.get(key)? {
            Attribute::LongArray(v) => Some(v),
            _ => None,
        }
    }

    /// `f32`s under `key`.
    #[must_use]
    pub fn get_float_array(&self, key: &str) -> Option<&[f32]> {
        match self.get(key)? {
            Attribute::FloatArray(v) => Some(v),
            _ => None,
        }
    }

    /// `f64`s under `key`.
    #[must_use]
    pub fn get_double_array(&self, key: &str) -> Option<&[f64]> {
        match self.get(key)? {
            Attribute::DoubleArray(v) => Some(v),
            _ => None,
        }
    }

    /// `bool`s under `key`.
    #[must_use]
    pub fn get_bool_array(&self, key: &str) -> Option<&[bool]> {
        match self.get(key)? {
            Attribute::BoolArray(v) => Some(v),
            _ => None,
        }
    }

    /// Strings under `key`.
    #[must_use]
    pub fn get_string_array(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            Attribute::StringArray(v) => Some(v),
            _ => None,
        }
    }

    /// Trees under `key`.
    #[must_use]
    pub fn get_tree_array(&self, key: &str) -> Option<&[Self]> {
        match self.get(key)? {
            Attribute::TreeArray(v) => Some(v),
            _ => None,
        }
    }

    /// Model placement stored as a subtree:
    ///
    /// ```text
    /// key ─┬─ origin      { x, y, z }   default (0.5, 0.5, 0.5)
    ///      ├─ rotation    { x, y, z }   degrees, default 0
    ///      ├─ translation { x, y, z }   default 0
    ///      └─ scale       float         default 1
    /// ```
    ///
    /// Absent components inside a present vector read as 0.
    #[must_use]
    pub fn get_model_transform(&self, key: &str) -> Option<ModelTransform> {
        let tree = self.get_tree_attribute(key)?;
        let vector = |name: &str, default: Vec3| {
            tree.get_tree_attribute(name).map_or(default, |v| {
                Vec3::new(v.get_float("x", 0.0), v.get_float("y", 0.0), v.get_float("z", 0.0))
            })
        };

        Some(ModelTransform {
            translation: vector("translation", Vec3::ZERO),
            rotation: vector("rotation", Vec3::ZERO),
            origin: vector("origin", Vec3::splat(0.5)),
            scale_xyz: Vec3::splat(tree.get_float("scale", 1.0)),
        })
    }

    // ========================================================================
    // CODEC
    // ========================================================================

    /// Writes every entry then the terminator.
    pub fn write_to(&self, writer: &mut AttributeWriter) {
        for (key, value) in &self.entries {
            writer.write_u8(value.tag());
            writer.write_string(key);
            value.write_to(writer);
        }
        writer.write_u8(0);
    }

    /// Encodes into a fresh buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = AttributeWriter::with_capacity(64);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Decodes one tree from `reader`, leaving the reader after its
    /// terminator. Seals the tag registry.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`] except `TrailingBytes`.
    pub fn read_from(reader: &mut AttributeReader<'_>) -> DecodeResult<Self> {
        let registry = decode_registry();
        Self::decode(reader, &registry, 0).map_err(|e| {
            tracing::warn!(error = %e, offset = reader.position(), "Failed to decode attribute tree");
            e
        })
    }

    /// Decodes a buffer holding exactly one tree.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; bytes after the terminator are
    /// [`DecodeError::TrailingBytes`].
    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = AttributeReader::new(bytes);
        let tree = Self::read_from(&mut reader)?;
        if !reader.is_at_end() {
            let remaining = reader.remaining();
            tracing::warn!(remaining, "Trailing bytes after attribute tree");
            return Err(DecodeError::TrailingBytes { remaining });
        }
        Ok(tree)
    }

    pub(crate) fn decode(
        reader: &mut AttributeReader<'_>,
        registry: &AttributeRegistry,
        depth: usize,
    ) -> DecodeResult<Self> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::DepthExceeded { max: MAX_DEPTH });
        }

        let mut tree = Self::new();
        loop {
            let offset = reader.position();
            let tag = reader.read_u8()?;
            if tag == 0 {
                return Ok(tree);
            }
            let kind = registry
                .resolve(tag)
                .ok_or(DecodeError::UnknownTag { tag, offset })?;
            let key = reader.read_string()?;
            let value = Attribute::read_from(kind, reader, registry, depth)?;
            // Repeated keys: last one wins, first position kept
            tree.set_attribute(key, value);
        }
    }

    // ========================================================================
    // COMPARISON
    // ========================================================================

    /// Equality that skips the given slash-separated paths, e.g.
    /// `"display/name"`. A skipped path may be present in either tree.
    #[must_use]
    pub fn equals_ignoring(&self, other: &Self, ignore_paths: &[&str]) -> bool {
        if ignore_paths.is_empty() {
            return self == other;
        }
        self.equals_at(other, "", ignore_paths)
    }

    fn equals_at(&self, other: &Self, path: &str, ignore: &[&str]) -> bool {
        let child_path = |key: &str| {
            if path.is_empty() {
                key.to_owned()
            } else {
                format!("{path}/{key}")
            }
        };

        for (key, mine) in &self.entries {
            let full = child_path(key);
            if ignore.contains(&full.as_str()) {
                continue;
            }
            let Some(theirs) = other.get(key) else {
                return false;
            };
            let same = match (mine, theirs) {
                (Attribute::Tree(a), Attribute::Tree(b)) => a.equals_at(b, &full, ignore),
                _ => mine == theirs,
            };
            if !same {
                return false;
            }
        }

        other
            .keys()
            .all(|key| self.has_attribute(key) || ignore.contains(&child_path(key).as_str()))
    }

    /// True when every entry of `self` is in `other` with an equal value.
    /// Nested trees only need to be subsets themselves.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.len() <= other.len()
            && self.entries.iter().all(|(key, mine)| match (mine, other.get(key)) {
                (_, None) => false,
                (Attribute::Tree(a), Some(Attribute::Tree(b))) => a.is_subset_of(b),
                (_, Some(theirs)) => mine == theirs,
            })
    }
}

/// Same key set with equal values; order is ignored.
impl PartialEq for TreeAttribute {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl fmt::Debug for TreeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for TreeAttribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Attribute>> FromIterator<(K, V)> for TreeAttribute {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.set_attribute(key, value);
        }
        tree
    }
}

/// Tree held by `slot`, replacing any other variant with an empty tree.
fn tree_in_slot(slot: &mut Attribute) -> &mut TreeAttribute {
    match slot {
        Attribute::Tree(tree) => tree,
        other => {
            *other = Attribute::Tree(TreeAttribute::new());
            tree_in_slot(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itemstack::ItemClass;

    fn sample() -> TreeAttribute {
        let mut tree = TreeAttribute::new();
        tree.set_int("count", 4);
        tree.set_string("name", "lantern");
        tree.get_or_add_tree_attribute("display").set_string("color", "red");
        tree
    }

    #[test]
    fn test_set_get_and_order() {
        let mut tree = sample();
        assert_eq!(tree.keys().collect::<Vec<_>>(), ["count", "name", "display"]);
        let old = tree.set_attribute("count", 9);
        assert_eq!(old, Some(Attribute::Int(4)));
        assert_eq!(tree.index_of("count"), Some(0));
        assert_eq!(tree.get_int("count", 0), 9);
        assert_eq!(tree.get_long("count", -1), -1);
        assert_eq!(tree.get_string_or("missing", "none"), "none");
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut tree = sample();
        assert!(tree.remove_attribute("count").is_some());
        assert!(tree.remove_attribute("count").is_none());
        assert_eq!(tree.keys().collect::<Vec<_>>(), ["name", "display"]);
    }

    #[test]
    fn test_get_or_add_replaces_other_variant() {
        let mut tree = TreeAttribute::new();
        tree.set_int("slot", 1);
        tree.set_int("after", 2);
        tree.get_or_add_tree_attribute("slot").set_bool("open", true);
        assert!(tree.get_tree_attribute("slot").unwrap().get_bool("open", false));
        assert_eq!(tree.keys().collect::<Vec<_>>(), ["slot", "after"]);

        // An existing tree is returned as is
        tree.get_or_add_tree_attribute("slot").set_int("level", 3);
        let slot = tree.get_tree_attribute("slot").unwrap();
        assert!(slot.get_bool("open", false));
        assert_eq!(slot.get_int("level", 0), 3);
    }

    #[test]
    fn test_clone_matches_codec_copy() {
        let mut tree = sample();
        tree.set_float_array("weights", vec![0.5, f32::NAN]);
        tree.set_itemstack("held", Some(ItemStack::new(ItemClass::Block, 3, 1)));
        tree.set_tree_array("pages", vec![sample(), TreeAttribute::new()]);

        let codec_copy = TreeAttribute::from_bytes(&tree.to_bytes()).unwrap();
        let clone = tree.clone();
        assert_eq!(clone, codec_copy);
        assert_eq!(clone.to_bytes(), codec_copy.to_bytes());
        assert_eq!(clone.keys().collect::<Vec<_>>(), codec_copy.keys().collect::<Vec<_>>());
    }

    #[test]
    fn test_wire_layout() {
        let mut tree = TreeAttribute::new();
        tree.set_int("a", 1);
        assert_eq!(tree.to_bytes(), vec![1, 1, b'a', 1, 0, 0, 0, 0]);
        assert_eq!(TreeAttribute::new().to_bytes(), vec![0]);
    }

    #[test]
    fn test_roundtrip() {
        let tree = sample();
        let decoded = TreeAttribute::from_bytes(&tree.to_bytes()).unwrap();
        assert_eq!(decoded, tree);
        assert_eq!(decoded.to_bytes(), tree.to_bytes());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: TreeAttribute = [("x", 1), ("y", 2)].into_iter().collect();
        let b: TreeAttribute = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn test_unknown_tag() {
        let bytes = [99, 1, b'k', 0];
        assert_eq!(
            TreeAttribute::from_bytes(&bytes),
            Err(DecodeError::UnknownTag { tag: 99, offset: 0 })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        assert_eq!(
            TreeAttribute::from_bytes(&[0, 0]),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        );
        let mut reader = AttributeReader::new(&[0, 0]);
        assert!(TreeAttribute::read_from(&mut reader).is_ok());
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_depth_limit() {
        fn nested(levels: usize) -> TreeAttribute {
            let mut tree = TreeAttribute::new();
            if levels > 0 {
                tree.set_tree("c", nested(levels - 1));
            }
            tree
        }
        assert!(TreeAttribute::from_bytes(&nested(MAX_DEPTH).to_bytes()).is_ok());
        assert_eq!(
            TreeAttribute::from_bytes(&nested(MAX_DEPTH + 1).to_bytes()),
            Err(DecodeError::DepthExceeded { max: MAX_DEPTH })
        );
    }

    #[test]
    fn test_equals_ignoring_nested_path() {
        let mut a = sample();
        let mut b = sample();
        a.get_or_add_tree_attribute("display").set_string("color", "blue");
        b.get_or_add_tree_attribute("display").set_int("extra", 1);
        assert!(!a.equals_ignoring(&b, &[]));
        assert!(!a.equals_ignoring(&b, &["display/color"]));
        assert!(a.equals_ignoring(&b, &["display/color", "display/extra"]));
        assert!(a.equals_ignoring(&b, &["display"]));
        // Bare key does not match a nested path
        assert!(!a.equals_ignoring(&b, &["color", "extra"]));
    }

    #[test]
    fn test_subset() {
        let full = sample();
        let mut part = TreeAttribute::new();
        part.set_int("count", 4);
        part.get_or_add_tree_attribute("display");
        assert!(part.is_subset_of(&full));
        assert!(!full.is_subset_of(&part));
        assert!(TreeAttribute::new().is_subset_of(&full));

        part.get_or_add_tree_attribute("display").set_int("size", 2);
        assert!(!part.is_subset_of(&full));
    }

    #[test]
    fn test_itemstack_slot() {
        let mut tree = TreeAttribute::new();
        tree.set_itemstack("held", Some(ItemStack::new(ItemClass::Item, 12, 3)));
        tree.set_itemstack("empty", None);
        assert_eq!(tree.get_itemstack("held").map(|s| s.id), Some(12));
        assert!(tree.get_itemstack("empty").is_none());
        assert!(tree.has_attribute("empty"));
    }

    #[test]
    fn test_model_transform_defaults() {
        let mut tree = TreeAttribute::new();
        let shape = tree.get_or_add_tree_attribute("transform");
        shape.set_float("scale", 2.0);
        shape.get_or_add_tree_attribute("rotation").set_float("y", 90.0);

        let transform = tree.get_model_transform("transform").unwrap();
        assert_eq!(transform.origin, Vec3::splat(0.5));
        assert_eq!(transform.rotation, Vec3::new(0.0, 90.0, 0.0));
        assert_eq!(transform.translation, Vec3::ZERO);
        assert_eq!(transform.scale_xyz, Vec3::splat(2.0));
        assert!(tree.get_model_transform("missing").is_none());
    }

    #[test]
    fn test_json_dump() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"count":4,"name":"lantern","display":{"color":"red"}}"#);
    }
}
