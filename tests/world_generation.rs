use voxel_world::{
    Geometry, MeshingMode, ParallelGenerator, VoxelWorld, WorldConfig, WorldDimensions,
};

fn world(chunk_size: usize, chunks_x: usize, chunks_z: usize, max_height: usize) -> VoxelWorld {
    VoxelWorld::new(
        WorldDimensions {
            chunk_size,
            world_size_x: chunks_x,
            world_size_z: chunks_z,
            max_height,
            voxel_size: 1.0,
        },
        Geometry::cube(),
        MeshingMode::Instanced,
    )
}

fn count_active(world: &VoxelWorld) -> usize {
    world.chunks().iter().map(|chunk| chunk.active_count()).sum()
}

#[test]
fn written_voxels_read_back_and_are_solid() {
    let mut world = world(8, 2, 3, 16);
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..200 {
        let (x, y, z) = (rng.i32(0..16), rng.i32(0..16), rng.i32(0..24));
        let id = rng.u8(1..=255);
        world.set_voxel(x, y, z, id);
        assert_eq!(world.get_voxel(x, y, z), id);
        assert!(world.is_voxel_solid(x, y, z));
    }
}

#[test]
fn active_count_tracks_transitions_exactly() {
    let mut world = world(4, 3, 3, 8);
    let mut rng = fastrand::Rng::with_seed(42);
    let mut expected = 0usize;

    for _ in 0..2_000 {
        let (x, y, z) = (rng.i32(-2..14), rng.i32(-2..10), rng.i32(-2..14));
        let id = if rng.bool() { 0 } else { rng.u8(1..=6) };
        let was_solid = world.is_voxel_solid(x, y, z);
        world.set_voxel(x, y, z, id);
        let in_range = world.dimensions().contains(x, y, z);
        match (in_range, was_solid, id != 0) {
            (true, false, true) => expected += 1,
            (true, true, false) => expected -= 1,
            _ => {}
        }
        assert_eq!(world.active_voxels(), expected);
    }
    assert_eq!(count_active(&world), expected);
}

#[test]
fn out_of_range_access_is_inert() {
    let mut world = world(4, 1, 1, 4);
    world.set_voxel(-1, 0, 0, 3);
    world.set_voxel(4, 0, 0, 3);
    world.set_voxel(0, 4, 0, 3);
    assert_eq!(world.active_voxels(), 0);
    assert_eq!(world.get_voxel(-1, 0, 0), 0);
    assert!(!world.is_voxel_solid(0, -1, 0));
    assert!(world.dirty_chunks().next().is_none());
}

#[test]
fn clearing_a_chunk_subtracts_its_active_voxels() {
    let mut world = world(4, 2, 2, 4);
    for x in 0..8 {
        for z in 0..8 {
            world.set_voxel(x, 0, z, 1);
        }
    }
    assert_eq!(world.active_voxels(), 64);

    world.clear_chunk(1, 0);
    assert_eq!(world.active_voxels(), 48);
    assert_eq!(world.get_voxel(5, 0, 2), 0);
    assert_eq!(world.get_voxel(2, 0, 2), 1);
    assert_eq!(world.chunk(1, 0).map(|c| c.active_count()), Some(0));

    // Out-of-range chunks are ignored.
    world.clear_chunk(2, 0);
    world.clear_chunk(-1, 1);
    assert_eq!(world.active_voxels(), 48);
}

#[test]
fn parallel_generation_matches_a_serial_sweep() {
    let generator_fn = |x: i32, y: i32, z: i32| {
        let id = ((x * 7 + y * 3 + z * 5).rem_euclid(6) + 1) as u8;
        let place = (x ^ z) % 3 != 0 && y <= (x + z) % 12;
        (id, place)
    };

    // 80 columns per axis: several tiles, the last one partial.
    let mut parallel = world(16, 5, 5, 12);
    let mut serial = world(16, 5, 5, 12);

    let stats = ParallelGenerator::with_workers(4)
        .generate_voxels_parallel(&mut parallel, generator_fn)
        .unwrap();

    for z in 0..80 {
        for y in 0..12 {
            for x in 0..80 {
                let (id, place) = generator_fn(x, y, z);
                if place {
                    serial.set_voxel(x, y, z, id);
                }
            }
        }
    }

    assert_eq!(stats.tiles, 9);
    assert_eq!(stats.cells_visited, 80 * 12 * 80);
    assert_eq!(stats.cells_written, serial.active_voxels());
    assert_eq!(parallel.active_voxels(), serial.active_voxels());
    assert_eq!(parallel.active_voxels(), count_active(&parallel));
    for (a, b) in parallel.chunks().iter().zip(serial.chunks()) {
        assert_eq!(a.cells(), b.cells());
    }
}

#[test]
fn regenerating_over_existing_voxels_keeps_the_count_exact() {
    let mut world = world(8, 4, 4, 8);
    let mut generator = ParallelGenerator::with_workers(3);

    generator
        .generate_voxels_parallel(&mut world, |_, y, _| (2, y < 4))
        .unwrap();
    assert_eq!(world.active_voxels(), 32 * 32 * 4);

    // Clear the top two filled layers, overwrite the bottom with another id.
    generator
        .generate_voxels_parallel(&mut world, |_, y, _| match y {
            0 => (5, true),
            2 | 3 => (0, true),
            _ => (0, false),
        })
        .unwrap();
    assert_eq!(world.active_voxels(), 32 * 32 * 2);
    assert_eq!(world.active_voxels(), count_active(&world));
    assert_eq!(world.get_voxel(9, 0, 30), 5);
    assert_eq!(world.get_voxel(9, 1, 30), 2);
}

#[test]
fn sdf_generation_is_rejected_in_instanced_mode() {
    let mut world = world(4, 1, 1, 4);
    let result = ParallelGenerator::with_workers(1).generate_sdf_parallel(&mut world, |_, _, _| -1.0);
    assert!(matches!(result, Err(voxel_world::GenerationError::SdfUnavailable)));
    assert!(world.sdf().is_none());
}

#[test]
fn config_defaults_and_validation() {
    let config = WorldConfig::from_json_str(r#"{ "mode": "surface_nets", "seed": 9 }"#).unwrap();
    assert_eq!(config.chunk_size, 16);
    assert_eq!(config.max_height, 64);
    assert_eq!(config.mode, MeshingMode::SurfaceNets);

    let world = VoxelWorld::from_config(&config, Geometry::cube()).unwrap();
    assert_eq!(world.dimensions().column_count(), 64 * 64);
    assert!(world.sdf().is_some());

    assert!(WorldConfig::from_json_str(r#"{ "max_height": 0 }"#).is_err());
    assert!(WorldConfig::from_json_str(r#"{ "voxel_size": -1.0 }"#).is_err());
    assert!(WorldConfig::from_json_str(r#"{ "mode": "marching_cubes" }"#).is_err());
}
