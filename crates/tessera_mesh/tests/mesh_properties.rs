//! # Mesh Property Tests
//!
//! Seeded random workloads against the buffer invariants: counts stay
//! within capacity, growth keeps every written value, clones are packed
//! and independent, and merges preserve geometry.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera_mesh::{ChannelSet, ChunkRenderPass, MeshData, QUAD_VERTICES};
use tessera_shared::{color_from_rgba, BlockFacing};

const SEED: u64 = 0x7e55_e7a;

fn random_quad(mesh: &mut MeshData, rng: &mut ChaCha8Rng) {
    let first = u32::try_from(mesh.vertices_count()).unwrap();
    let color = color_from_rgba(rng.gen(), rng.gen(), rng.gen(), 255);
    for _ in 0..QUAD_VERTICES {
        let xyz = [rng.gen_range(0.0..16.0), rng.gen_range(0.0..16.0), rng.gen_range(0.0..16.0)];
        mesh.add_vertex_with_flags(xyz, [rng.gen(), rng.gen()], color, rng.gen_range(0..256));
    }
    mesh.add_quad_indices(first);
    mesh.add_xyz_face(rng.gen_range(0..6));
    let pass = ChunkRenderPass::ALL[rng.gen_range(0..ChunkRenderPass::ALL.len())];
    mesh.add_render_pass(if rng.gen_bool(0.2) { None } else { Some(pass) });
}

/// Test: counts never exceed capacity under a random append workload.
#[test]
fn test_counts_within_capacity() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut mesh = MeshData::new();

    for _ in 0..2_000 {
        match rng.gen_range(0..4) {
            0 => random_quad(&mut mesh, &mut rng),
            1 => mesh.add_vertex([rng.gen(), rng.gen(), rng.gen()], [0.0, 0.0]),
            2 => mesh.add_index(rng.gen_range(0..1_000)),
            _ => mesh.add_normal_facing(BlockFacing::ALL[rng.gen_range(0..6)]),
        }
        assert!(mesh.vertices_count() <= mesh.vertices_max());
        assert!(mesh.indices_count() <= mesh.indices_max());
        assert_eq!(mesh.xyz().len(), mesh.vertices_count() * 3);
        assert_eq!(mesh.uv().unwrap().len(), mesh.vertices_count() * 2);
    }
}

/// Test: growth never loses written data.
#[test]
fn test_growth_keeps_prefix() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 1);
    let mut mesh = MeshData::with_capacity(1, 1, ChannelSet::ALL);
    let mut expected = Vec::new();

    for _ in 0..5_000 {
        let xyz: [f32; 3] = [rng.gen(), rng.gen(), rng.gen()];
        mesh.add_vertex(xyz, [0.0, 0.0]);
        expected.extend_from_slice(&xyz);
    }
    assert_eq!(mesh.xyz(), expected.as_slice());
}

/// Test: clearing and refilling reuses the allocation.
#[test]
fn test_pooled_reuse_does_not_grow() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 2);
    let mut mesh = MeshData::new();
    for _ in 0..64 {
        random_quad(&mut mesh, &mut rng);
    }
    let vmax = mesh.vertices_max();
    let imax = mesh.indices_max();

    for _ in 0..10 {
        mesh.clear();
        for _ in 0..64 {
            random_quad(&mut mesh, &mut rng);
        }
        assert_eq!(mesh.vertices_max(), vmax);
        assert_eq!(mesh.indices_max(), imax);
    }
}

/// Test: splitting by render pass and merging back keeps every quad once.
#[test]
fn test_filtered_merges_partition_quads() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 3);
    let mut source = MeshData::new();
    for _ in 0..200 {
        random_quad(&mut source, &mut rng);
    }

    let mut total_quads = 0;
    for pass in ChunkRenderPass::ALL {
        let mut part = source.empty_clone();
        part.add_mesh_data_filtered(&source, pass);
        assert_eq!(part.indices_count(), part.quad_count() * 6);
        for (i, &index) in part.indices().iter().enumerate() {
            let quad = u32::try_from(i / 6).unwrap();
            assert!(index >= quad * 4 && index < quad * 4 + 4);
        }
        for &tag in part.render_passes() {
            assert!(pass.accepts(tag));
        }
        total_quads += part.quad_count();
    }
    assert_eq!(total_quads, source.quad_count());
}

/// Test: a clone uploads the same bytes and does not alias the original.
#[test]
fn test_clone_matches_upload_bytes() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 4);
    let mut mesh = MeshData::with_capacity(1_024, 1_024, ChannelSet::STANDARD);
    for _ in 0..37 {
        random_quad(&mut mesh, &mut rng);
    }

    let mut copy = mesh.clone();
    assert_eq!(copy.xyz_bytes(), mesh.xyz_bytes());
    assert_eq!(copy.indices_bytes(), mesh.indices_bytes());
    assert_eq!(copy.uv_bytes(), mesh.uv_bytes());
    assert_eq!(copy.rgba(), mesh.rgba());
    assert_eq!(copy.flags_bytes(), mesh.flags_bytes());
    assert_eq!(copy.render_passes(), mesh.render_passes());

    copy.translate_xyz(1.0, 0.0, 0.0);
    assert_ne!(copy.xyz(), mesh.xyz());
}

/// Test: whole-mesh merge appends geometry unchanged.
#[test]
fn test_whole_merge_concatenates() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 5);
    let mut a = MeshData::new();
    let mut b = MeshData::new();
    for _ in 0..10 {
        random_quad(&mut a, &mut rng);
        random_quad(&mut b, &mut rng);
    }

    let mut merged = a.clone();
    merged.add_mesh_data(&b);
    assert_eq!(merged.vertices_count(), a.vertices_count() + b.vertices_count());
    assert_eq!(&merged.xyz()[..a.xyz().len()], a.xyz());
    assert_eq!(&merged.xyz()[a.xyz().len()..], b.xyz());
    let offset = u32::try_from(a.vertices_count()).unwrap();
    for (merged_index, &index) in merged.indices()[a.indices_count()..].iter().zip(b.indices()) {
        assert_eq!(*merged_index, index + offset);
    }
}
