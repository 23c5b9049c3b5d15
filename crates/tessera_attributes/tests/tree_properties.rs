//! # Tree Property Tests
//!
//! Seeded random trees against the codec and comparison invariants:
//! encode/decode is lossless, damaged input fails cleanly, and equality
//! and subset agree with each other.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera_attributes::{
    Attribute, AttributeKind, AttributeReader, DecodeError, ItemClass, ItemStack, TreeAttribute, MAX_DEPTH,
};

const SEED: u64 = 0xa77_2ee;

fn random_string(rng: &mut ChaCha8Rng) -> String {
    const CHARS: &[char] = &['a', 'b', 'z', '0', '/', ' ', 'é', '木', '🌲'];
    (0..rng.gen_range(0..12)).map(|_| CHARS[rng.gen_range(0..CHARS.len())]).collect()
}

fn random_value(rng: &mut ChaCha8Rng, kind: AttributeKind, depth: usize) -> Attribute {
    let len = rng.gen_range(0..6);
    match kind {
        AttributeKind::Int => Attribute::Int(rng.gen()),
        AttributeKind::Long => Attribute::Long(rng.gen()),
        AttributeKind::Double => Attribute::Double(rng.gen_range(-1e6..1e6)),
        AttributeKind::Float => Attribute::Float(rng.gen_range(-1e3..1e3)),
        AttributeKind::String => Attribute::String(random_string(rng)),
        AttributeKind::Tree => Attribute::Tree(random_tree(rng, depth + 1)),
        AttributeKind::Itemstack => {
            if rng.gen_bool(0.3) {
                Attribute::Itemstack(None)
            } else {
                let class = if rng.gen() { ItemClass::Block } else { ItemClass::Item };
                let mut stack = ItemStack::new(class, rng.gen_range(0..4_000), rng.gen_range(1..65));
                stack.attributes = random_tree(rng, depth + 1);
                Attribute::Itemstack(Some(stack))
            }
        }
        AttributeKind::ByteArray => Attribute::ByteArray((0..len * 3).map(|_| rng.gen()).collect()),
        AttributeKind::Bool => Attribute::Bool(rng.gen()),
        AttributeKind::StringArray => Attribute::StringArray((0..len).map(|_| random_string(rng)).collect()),
        AttributeKind::IntArray => Attribute::IntArray((0..len).map(|_| rng.gen()).collect()),
        AttributeKind::FloatArray => Attribute::FloatArray((0..len).map(|_| rng.gen()).collect()),
        AttributeKind::DoubleArray => Attribute::DoubleArray((0..len).map(|_| rng.gen()).collect()),
        AttributeKind::TreeArray => {
            Attribute::TreeArray((0..len.min(2)).map(|_| random_tree(rng, depth + 1)).collect())
        }
        AttributeKind::LongArray => Attribute::LongArray((0..len).map(|_| rng.gen()).collect()),
        AttributeKind::BoolArray => Attribute::BoolArray((0..len).map(|_| rng.gen()).collect()),
    }
}

fn random_tree(rng: &mut ChaCha8Rng, depth: usize) -> TreeAttribute {
    let mut tree = TreeAttribute::new();
    let entries = if depth >= 3 { rng.gen_range(0..3) } else { rng.gen_range(0..8) };
    for i in 0..entries {
        let mut kind = AttributeKind::ALL[rng.gen_range(0..AttributeKind::ALL.len())];
        if depth >= 3 && matches!(kind, AttributeKind::Tree | AttributeKind::TreeArray | AttributeKind::Itemstack) {
            kind = AttributeKind::Int;
        }
        let value = random_value(rng, kind, depth);
        tree.set_attribute(format!("k{i}_{}", random_string(rng)), value);
    }
    tree
}

/// One value of every kind, two levels deep.
fn every_kind() -> TreeAttribute {
    let mut inner = TreeAttribute::new();
    inner.set_double("d", -0.5);
    inner.get_or_add_tree_attribute("deeper").set_long("l", -9);

    let mut stack = ItemStack::new(ItemClass::Block, 17, 32);
    stack.attributes.set_string("material", "granite");

    let mut tree = TreeAttribute::new();
    tree.set_int("int", i32::MIN);
    tree.set_long("long", i64::MAX);
    tree.set_double("double", std::f64::consts::PI);
    tree.set_float("float", f32::NAN);
    tree.set_string("string", "héllo");
    tree.set_tree("tree", inner.clone());
    tree.set_itemstack("stack", Some(stack));
    tree.set_bytes("bytes", vec![0_u8, 1, 254, 255]);
    tree.set_bool("bool", true);
    tree.set_string_array("strings", vec!["a".to_owned(), String::new(), "木".to_owned()]);
    tree.set_int_array("ints", vec![1, -1, 0]);
    tree.set_float_array("floats", vec![0.25, f32::INFINITY]);
    tree.set_double_array("doubles", vec![1e300]);
    tree.set_tree_array("trees", vec![inner, TreeAttribute::new()]);
    tree.set_long_array("longs", vec![i64::MIN]);
    tree.set_bool_array("bools", vec![false, true, true]);
    tree
}

/// Test: every kind survives encoding, including NaN payloads.
#[test]
fn test_every_kind_roundtrips() {
    let tree = every_kind();
    let kinds: Vec<u8> = tree.values().map(Attribute::tag).collect();
    assert_eq!(kinds, (1..=16).collect::<Vec<u8>>());

    let bytes = tree.to_bytes();
    let decoded = TreeAttribute::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, tree);
    assert_eq!(decoded.to_bytes(), bytes);
    assert!(decoded.get_float("float", 0.0).is_nan());
    assert_eq!(decoded.get_itemstack("stack").map(|s| s.stack_size), Some(32));
}

/// Test: random trees decode to an equal tree and re-encode identically.
#[test]
fn test_random_roundtrip() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    for _ in 0..300 {
        let tree = random_tree(&mut rng, 0);
        let bytes = tree.to_bytes();
        let decoded = TreeAttribute::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, tree);
        assert_eq!(decoded.to_bytes(), bytes);
        assert_eq!(decoded.keys().collect::<Vec<_>>(), tree.keys().collect::<Vec<_>>());
    }
}

/// Test: every strict prefix of a valid encoding is rejected without panicking.
#[test]
fn test_truncation_always_fails() {
    let bytes = every_kind().to_bytes();
    for cut in 0..bytes.len() {
        assert!(TreeAttribute::from_bytes(&bytes[..cut]).is_err(), "prefix of {cut} bytes decoded");
    }
}

/// Test: random byte noise never panics the decoder.
#[test]
fn test_noise_never_panics() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 2);
    for _ in 0..2_000 {
        let len = rng.gen_range(0..64);
        let mut noise: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        // Keep the first tag plausible so decoding gets past the first byte
        if let Some(first) = noise.first_mut() {
            *first %= 17;
        }
        let _ = TreeAttribute::from_bytes(&noise);
    }
}

/// Test: the stream stops right after one tree so several can be concatenated.
#[test]
fn test_concatenated_trees() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 3);
    let trees: Vec<TreeAttribute> = (0..5).map(|_| random_tree(&mut rng, 0)).collect();
    let bytes: Vec<u8> = trees.iter().flat_map(TreeAttribute::to_bytes).collect();

    let mut reader = AttributeReader::new(&bytes);
    for tree in &trees {
        assert_eq!(&TreeAttribute::read_from(&mut reader).unwrap(), tree);
    }
    assert!(reader.is_at_end());
}

/// Test: nesting past the limit through tree arrays is rejected.
#[test]
fn test_depth_limit_through_arrays() {
    let mut tree = TreeAttribute::new();
    for _ in 0..=MAX_DEPTH {
        let mut parent = TreeAttribute::new();
        parent.set_tree_array("a", vec![tree]);
        tree = parent;
    }
    assert_eq!(
        TreeAttribute::from_bytes(&tree.to_bytes()),
        Err(DecodeError::DepthExceeded { max: MAX_DEPTH })
    );
}

/// Test: every tree is a subset of itself and of any superset built from it.
#[test]
fn test_subset_properties() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 4);
    for _ in 0..200 {
        let tree = random_tree(&mut rng, 0);
        assert!(tree.is_subset_of(&tree));
        assert!(TreeAttribute::new().is_subset_of(&tree));

        let mut bigger = tree.clone();
        bigger.set_string("zz_extra", "x");
        assert!(tree.is_subset_of(&bigger));
        assert!(!bigger.is_subset_of(&tree));
        assert!(bigger.equals_ignoring(&tree, &["zz_extra"]));
        assert_ne!(bigger, tree);
    }
}

/// Test: the JSON dump mirrors the tree structure.
#[test]
fn test_json_dump() {
    let mut tree = TreeAttribute::new();
    tree.set_int("health", 20);
    tree.set_itemstack("slot", None);
    tree.set_itemstack("hand", Some(ItemStack::new(ItemClass::Item, 5, 2)));
    tree.set_bool_array("flags", vec![true]);

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "health": 20,
            "slot": null,
            "hand": { "class": "item", "id": 5, "stack_size": 2, "attributes": {} },
            "flags": [true],
        })
    );
}

/// Test: typed lookups through a nested tree, and misses for absent keys.
#[test]
fn test_nested_lookup_scenario() {
    let mut tree = TreeAttribute::new();
    tree.set_int("a", 5);
    tree.set_string("b", "x");
    tree.get_or_add_tree_attribute("c").set_float("d", 1.5);

    assert_eq!(tree.get_int("a", 0), 5);
    assert_eq!(tree.get_string("b"), Some("x"));
    let nested = tree.get_tree_attribute("c").unwrap();
    assert!((nested.get_float("d", 0.0) - 1.5).abs() < f32::EPSILON);
    assert!(!tree.has_attribute("z"));
    // Wrong variant reads as missing
    assert_eq!(tree.try_get_int("b"), None);
    assert_eq!(tree.get_long("a", -1), -1);
}

/// Test: a clone is equal and fully independent.
#[test]
fn test_clone_independence() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 5);
    let original = random_tree(&mut rng, 0);
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.get_or_add_tree_attribute("k_new").set_int("n", 1);
    assert!(!original.has_attribute("k_new"));
    assert_ne!(copy, original);
}
