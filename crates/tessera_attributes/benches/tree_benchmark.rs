//! Benchmark for attribute tree encoding and decoding.
//!
//! TARGET: a block entity sized tree (a few dozen entries, two levels) in
//! well under ten microseconds each way
//!
//! Run with: cargo bench --package tessera_attributes --bench tree_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tessera_attributes::{AttributeWriter, ItemClass, ItemStack, TreeAttribute};

fn block_entity_tree() -> TreeAttribute {
    let mut tree = TreeAttribute::new();
    tree.set_string("blockCode", "chest-east");
    tree.set_int("posx", 51_200);
    tree.set_int("posy", 110);
    tree.set_int("posz", 51_199);
    tree.set_double("lastTick", 1_234.5);
    tree.set_bool_array("slotsLocked", vec![false; 16]);

    let inventory = tree.get_or_add_tree_attribute("inventory");
    inventory.set_int("qslots", 16);
    let slots = inventory.get_or_add_tree_attribute("slots");
    for i in 0..16 {
        let mut stack = ItemStack::new(ItemClass::Item, 1_000 + i, 64);
        stack.attributes.set_float("condition", 0.75);
        slots.set_itemstack(i.to_string(), Some(stack));
    }
    tree
}

fn benchmark_encode(c: &mut Criterion) {
    let tree = block_entity_tree();
    let size = tree.to_bytes().len();
    let mut group = c.benchmark_group("tree_encode");
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("to_bytes", |b| b.iter(|| black_box(tree.to_bytes())));

    let mut writer = AttributeWriter::with_capacity(size);
    group.bench_function("reused_writer", |b| {
        b.iter(|| {
            writer.reset();
            tree.write_to(&mut writer);
            black_box(writer.len())
        });
    });
    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let bytes = block_entity_tree().to_bytes();
    let mut group = c.benchmark_group("tree_decode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("from_bytes", |b| {
        b.iter(|| black_box(TreeAttribute::from_bytes(black_box(&bytes))).is_ok());
    });
    group.finish();
}

fn benchmark_compare(c: &mut Criterion) {
    let a = block_entity_tree();
    let mut b_tree = a.clone();
    b_tree.set_double("lastTick", 99.0);

    c.bench_function("tree_equals_ignoring", |b| {
        b.iter(|| black_box(a.equals_ignoring(&b_tree, &["lastTick"])));
    });
    c.bench_function("tree_is_subset_of", |b| {
        b.iter(|| black_box(a.is_subset_of(&b_tree)));
    });
}

criterion_group!(benches, benchmark_encode, benchmark_decode, benchmark_compare);
criterion_main!(benches);
