//! # Attribute Values
//!
//! The closed set of value types a tree can hold. Each variant has a stable
//! wire tag (1-16); tag 0 terminates a tree.
//!
//! | Tag | Variant     | Payload |
//! |-----|-------------|---------|
//! | 1   | Int         | `i32` |
//! | 2   | Long        | `i64` |
//! | 3   | Double      | `f64` |
//! | 4   | Float       | `f32` |
//! | 5   | String      | 7-bit length + UTF-8 |
//! | 6   | Tree        | nested entries, 0-terminated |
//! | 7   | Itemstack   | `bool` is-null, then the stack |
//! | 8   | ByteArray   | `i32` length + bytes |
//! | 9   | Bool        | one byte |
//! | 10  | StringArray | `i32` count + strings |
//! | 11  | IntArray    | `i32` count + `i32`s |
//! | 12  | FloatArray  | `i32` count + `f32`s |
//! | 13  | DoubleArray | `i32` count + `f64`s |
//! | 14  | TreeArray   | `i32` count + trees |
//! | 15  | LongArray   | `i32` count + `i64`s |
//! | 16  | BoolArray   | `i32` count + bytes |

use serde::{Serialize, Serializer};

use crate::codec::{AttributeReader, AttributeWriter};
use crate::error::DecodeResult;
use crate::itemstack::ItemStack;
use crate::registry::AttributeRegistry;
use crate::tree::TreeAttribute;

/// Variant discriminant, also the wire tag.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `i32`.
    Int = 1,
    /// `i64`.
    Long = 2,
    /// `f64`.
    Double = 3,
    /// `f32`.
    Float = 4,
    /// UTF-8 string.
    String = 5,
    /// Nested tree.
    Tree = 6,
    /// Optional item stack.
    Itemstack = 7,
    /// Raw bytes.
    ByteArray = 8,
    /// `bool`.
    Bool = 9,
    /// Strings.
    StringArray = 10,
    /// `i32`s.
    IntArray = 11,
    /// `f32`s.
    FloatArray = 12,
    /// `f64`s.
    DoubleArray = 13,
    /// Trees.
    TreeArray = 14,
    /// `i64`s.
    LongArray = 15,
    /// `bool`s.
    BoolArray = 16,
}

impl AttributeKind {
    /// Every built-in kind in tag order.
    pub const ALL: [Self; 16] = [
        Self::Int,
        Self::Long,
        Self::Double,
        Self::Float,
        Self::String,
        Self::Tree,
        Self::Itemstack,
        Self::ByteArray,
        Self::Bool,
        Self::StringArray,
        Self::IntArray,
        Self::FloatArray,
        Self::DoubleArray,
        Self::TreeArray,
        Self::LongArray,
        Self::BoolArray,
    ];

    /// Wire tag.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Float => "float",
            Self::String => "string",
            Self::Tree => "tree",
            Self::Itemstack => "itemstack",
            Self::ByteArray => "bytes",
            Self::Bool => "bool",
            Self::StringArray => "string[]",
            Self::IntArray => "int[]",
            Self::FloatArray => "float[]",
            Self::DoubleArray => "double[]",
            Self::TreeArray => "tree[]",
            Self::LongArray => "long[]",
            Self::BoolArray => "bool[]",
        }
    }
}

/// A tree value.
#[derive(Clone, Debug)]
pub enum Attribute {
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// Double precision float.
    Double(f64),
    /// Single precision float.
    Float(f32),
    /// String.
    String(String),
    /// Nested tree.
    Tree(TreeAttribute),
    /// Item stack slot; `None` is an empty slot.
    Itemstack(Option<ItemStack>),
    /// Raw bytes.
    ByteArray(Vec<u8>),
    /// Boolean.
    Bool(bool),
    /// Strings.
    StringArray(Vec<String>),
    /// 32-bit integers.
    IntArray(Vec<i32>),
    /// Single precision floats.
    FloatArray(Vec<f32>),
    /// Double precision floats.
    DoubleArray(Vec<f64>),
    /// Trees.
    TreeArray(Vec<TreeAttribute>),
    /// 64-bit integers.
    LongArray(Vec<i64>),
    /// Booleans.
    BoolArray(Vec<bool>),
}

impl Attribute {
    /// Variant kind.
    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        match self {
            Self::Int(_) => AttributeKind::Int,
            Self::Long(_) => AttributeKind::Long,
            Self::Double(_) => AttributeKind::Double,
            Self::Float(_) => AttributeKind::Float,
            Self::String(_) => AttributeKind::String,
            Self::Tree(_) => AttributeKind::Tree,
            Self::Itemstack(_) => AttributeKind::Itemstack,
            Self::ByteArray(_) => AttributeKind::ByteArray,
            Self::Bool(_) => AttributeKind::Bool,
            Self::StringArray(_) => AttributeKind::StringArray,
            Self::IntArray(_) => AttributeKind::IntArray,
            Self::FloatArray(_) => AttributeKind::FloatArray,
            Self::DoubleArray(_) => AttributeKind::DoubleArray,
            Self::TreeArray(_) => AttributeKind::TreeArray,
            Self::LongArray(_) => AttributeKind::LongArray,
            Self::BoolArray(_) => AttributeKind::BoolArray,
        }
    }

    /// Wire tag of this value.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> u8 {
        self.kind().tag()
    }

    /// Nested tree, if this is one.
    #[must_use]
    pub const fn as_tree(&self) -> Option<&TreeAttribute> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Writes the payload (no tag, no key).
    pub fn write_to(&self, writer: &mut AttributeWriter) {
        match self {
            Self::Int(v) => writer.write_i32(*v),
            Self::Long(v) => writer.write_i64(*v),
            Self::Double(v) => writer.write_f64(*v),
            Self::Float(v) => writer.write_f32(*v),
            Self::String(v) => writer.write_string(v),
            Self::Tree(tree) => tree.write_to(writer),
            Self::Itemstack(stack) => {
                writer.write_bool(stack.is_none());
                if let Some(stack) = stack {
                    stack.write_to(writer);
                }
            }
            Self::ByteArray(bytes) => {
                writer.write_len(bytes.len());
                writer.write_raw(bytes);
            }
            Self::Bool(v) => writer.write_bool(*v),
            Self::StringArray(values) => {
                writer.write_len(values.len());
                for v in values {
                    writer.write_string(v);
                }
            }
            Self::IntArray(values) => {
                writer.write_len(values.len());
                for &v in values {
                    writer.write_i32(v);
                }
            }
            Self::FloatArray(values) => {
                writer.write_len(values.len());
                for &v in values {
                    writer.write_f32(v);
                }
            }
            Self::DoubleArray(values) => {
                writer.write_len(values.len());
                for &v in values {
                    writer.write_f64(v);
                }
            }
            Self::TreeArray(trees) => {
                writer.write_len(trees.len());
                for tree in trees {
                    tree.write_to(writer);
                }
            }
            Self::LongArray(values) => {
                writer.write_len(values.len());
                for &v in values {
                    writer.write_i64(v);
                }
            }
            Self::BoolArray(values) => {
                writer.write_len(values.len());
                for &v in values {
                    writer.write_bool(v);
                }
            }
        }
    }

    /// Reads a payload of the given kind. `depth` is the depth of the tree
    /// holding the value.
    pub(crate) fn read_from(
        kind: AttributeKind,
        reader: &mut AttributeReader<'_>,
        registry: &AttributeRegistry,
        depth: usize,
    ) -> DecodeResult<Self> {
        Ok(match kind {
            AttributeKind::Int => Self::Int(reader.read_i32()?),
            AttributeKind::Long => Self::Long(reader.read_i64()?),
            AttributeKind::Double => Self::Double(reader.read_f64()?),
            AttributeKind::Float => Self::Float(reader.read_f32()?),
            AttributeKind::String => Self::String(reader.read_string()?),
            AttributeKind::Tree => Self::Tree(TreeAttribute::decode(reader, registry, depth + 1)?),
            AttributeKind::Itemstack => {
                let is_null = reader.read_bool()?;
                if is_null {
                    Self::Itemstack(None)
                } else {
                    Self::Itemstack(Some(ItemStack::decode(reader, registry, depth)?))
                }
            }
            AttributeKind::ByteArray => {
                let len = reader.read_len(1)?;
                Self::ByteArray(reader.read_raw(len)?.to_vec())
            }
            AttributeKind::Bool => Self::Bool(reader.read_bool()?),
            AttributeKind::StringArray => {
                let len = reader.read_len(1)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_string()?);
                }
                Self::StringArray(values)
            }
            AttributeKind::IntArray => {
                let len = reader.read_len(4)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_i32()?);
                }
                Self::IntArray(values)
            }
            AttributeKind::FloatArray => {
                let len = reader.read_len(4)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_f32()?);
                }
                Self::FloatArray(values)
            }
            AttributeKind::DoubleArray => {
                let len = reader.read_len(8)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_f64()?);
                }
                Self::DoubleArray(values)
            }
            AttributeKind::TreeArray => {
                // An empty tree is still one terminator byte.
                let len = reader.read_len(1)?;
                let mut trees = Vec::with_capacity(len);
                for _ in 0..len {
                    trees.push(TreeAttribute::decode(reader, registry, depth + 1)?);
                }
                Self::TreeArray(trees)
            }
            AttributeKind::LongArray => {
                let len = reader.read_len(8)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_i64()?);
                }
                Self::LongArray(values)
            }
            AttributeKind::BoolArray => {
                let len = reader.read_len(1)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_bool()?);
                }
                Self::BoolArray(values)
            }
        })
    }
}

// ============================================================================
// EQUALITY
// ============================================================================

// NaN equals NaN so that a value always equals its own decoded copy.
#[inline]
fn f32_eq(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[inline]
fn f64_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn slices_eq<T: Copy>(a: &[T], b: &[T], eq: fn(T, T) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| eq(x, y))
}

/// Values are equal when they are the same variant with equal payloads.
/// Nested trees compare by key set, ignoring entry order.
impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => f64_eq(*a, *b),
            (Self::Float(a), Self::Float(b)) => f32_eq(*a, *b),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Tree(a), Self::Tree(b)) => a == b,
            (Self::Itemstack(a), Self::Itemstack(b)) => a == b,
            (Self::ByteArray(a), Self::ByteArray(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::StringArray(a), Self::StringArray(b)) => a == b,
            (Self::IntArray(a), Self::IntArray(b)) => a == b,
            (Self::FloatArray(a), Self::FloatArray(b)) => slices_eq(a, b, f32_eq),
            (Self::DoubleArray(a), Self::DoubleArray(b)) => slices_eq(a, b, f64_eq),
            (Self::TreeArray(a), Self::TreeArray(b)) => a == b,
            (Self::LongArray(a), Self::LongArray(b)) => a == b,
            (Self::BoolArray(a), Self::BoolArray(b)) => a == b,
            _ => false,
        }
    }
}

// ============================================================================
// JSON DUMP
// ============================================================================

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i32(*v),
            Self::Long(v) => serializer.serialize_i64(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::Float(v) => serializer.serialize_f32(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Tree(tree) => tree.serialize(serializer),
            Self::Itemstack(stack) => stack.serialize(serializer),
            Self::ByteArray(bytes) => bytes.serialize(serializer),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::StringArray(values) => values.serialize(serializer),
            Self::IntArray(values) => values.serialize(serializer),
            Self::FloatArray(values) => values.serialize(serializer),
            Self::DoubleArray(values) => values.serialize(serializer),
            Self::TreeArray(trees) => trees.serialize(serializer),
            Self::LongArray(values) => values.serialize(serializer),
            Self::BoolArray(values) => values.serialize(serializer),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<i32> for Attribute {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for Attribute {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for Attribute {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<TreeAttribute> for Attribute {
    fn from(value: TreeAttribute) -> Self {
        Self::Tree(value)
    }
}

impl From<ItemStack> for Attribute {
    fn from(value: ItemStack) -> Self {
        Self::Itemstack(Some(value))
    }
}

impl From<Vec<u8>> for Attribute {
    fn from(value: Vec<u8>) -> Self {
        Self::ByteArray(value)
    }
}

impl From<Vec<i32>> for Attribute {
    fn from(value: Vec<i32>) -> Self {
        Self::IntArray(value)
    }
}

impl From<Vec<i64>> for Attribute {
    fn from(value: Vec<i64>) -> Self {
        Self::LongArray(value)
    }
}

impl From<Vec<f32>> for Attribute {
    fn from(value: Vec<f32>) -> Self {
        Self::FloatArray(value)
    }
}

impl From<Vec<f64>> for Attribute {
    fn from(value: Vec<f64>) -> Self {
        Self::DoubleArray(value)
    }
}

impl From<Vec<bool>> for Attribute {
    fn from(value: Vec<bool>) -> Self {
        Self::BoolArray(value)
    }
}

impl From<Vec<String>> for Attribute {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

impl From<Vec<TreeAttribute>> for Attribute {
    fn from(value: Vec<TreeAttribute>) -> Self {
        Self::TreeArray(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &Attribute) -> Vec<u8> {
        let mut writer = AttributeWriter::new();
        value.write_to(&mut writer);
        writer.into_bytes()
    }

    #[test]
    fn test_tags_are_stable() {
        for (i, kind) in AttributeKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.tag()), i + 1);
        }
        assert_eq!(Attribute::from("x").tag(), 5);
        assert_eq!(Attribute::Itemstack(None).tag(), 7);
    }

    #[test]
    fn test_payload_layouts() {
        assert_eq!(encode(&Attribute::Int(1)), vec![1, 0, 0, 0]);
        assert_eq!(encode(&Attribute::Bool(true)), vec![1]);
        assert_eq!(encode(&Attribute::from("ab")), vec![2, b'a', b'b']);
        assert_eq!(encode(&Attribute::ByteArray(vec![9, 8])), vec![2, 0, 0, 0, 9, 8]);
        assert_eq!(encode(&Attribute::IntArray(vec![-1])), vec![1, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(encode(&Attribute::Itemstack(None)), vec![1]);
        assert_eq!(encode(&Attribute::Tree(TreeAttribute::new())), vec![0]);
    }

    #[test]
    fn test_variant_mismatch_is_unequal() {
        assert_ne!(Attribute::Int(1), Attribute::Long(1));
        assert_ne!(Attribute::Float(1.0), Attribute::Double(1.0));
        assert_ne!(Attribute::IntArray(vec![1, 2]), Attribute::IntArray(vec![1]));
    }

    #[test]
    fn test_nan_equals_itself() {
        assert_eq!(Attribute::Float(f32::NAN), Attribute::Float(f32::NAN));
        assert_eq!(
            Attribute::DoubleArray(vec![f64::NAN, 1.0]),
            Attribute::DoubleArray(vec![f64::NAN, 1.0])
        );
    }

    #[test]
    fn test_payload_roundtrip_every_kind() {
        let registry = AttributeRegistry::with_builtins();
        let mut nested = TreeAttribute::new();
        nested.set_int("n", 3);
        let values = [
            Attribute::Int(-7),
            Attribute::Long(1 << 40),
            Attribute::Double(0.125),
            Attribute::Float(-3.5),
            Attribute::from("tessera"),
            Attribute::Tree(nested.clone()),
            Attribute::Itemstack(None),
            Attribute::ByteArray(vec![0, 255]),
            Attribute::Bool(false),
            Attribute::StringArray(vec!["a".into(), String::new()]),
            Attribute::IntArray(vec![1, 2, 3]),
            Attribute::FloatArray(vec![0.5]),
            Attribute::DoubleArray(vec![]),
            Attribute::TreeArray(vec![nested, TreeAttribute::new()]),
            Attribute::LongArray(vec![i64::MAX]),
            Attribute::BoolArray(vec![true, false]),
        ];
        for value in &values {
            let bytes = encode(value);
            let mut reader = AttributeReader::new(&bytes);
            let decoded = Attribute::read_from(value.kind(), &mut reader, &registry, 0).unwrap();
            assert_eq!(&decoded, value);
            assert!(reader.is_at_end());
        }
    }
}
