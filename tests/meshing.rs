use approx::assert_relative_eq;
use cgmath::Point3;
use voxel_world::{
    create_instanced_model, create_surface_nets_model, BlockType, Geometry, MeshingMode,
    ParallelGenerator, VoxelColor, VoxelColorTable, VoxelWorld, WorldDimensions,
};

fn dims(chunk_size: usize, chunks_x: usize, chunks_z: usize, max_height: usize) -> WorldDimensions {
    WorldDimensions {
        chunk_size,
        world_size_x: chunks_x,
        world_size_z: chunks_z,
        max_height,
        voxel_size: 1.0,
    }
}

fn exposed_voxels(world: &VoxelWorld) -> Vec<Point3<f32>> {
    let d = *world.dimensions();
    let mut exposed = Vec::new();
    for x in 0..d.extent_x() as i32 {
        for y in 0..d.max_height as i32 {
            for z in 0..d.extent_z() as i32 {
                if !world.is_voxel_solid(x, y, z) {
                    continue;
                }
                let neighbours = [
                    (x + 1, y, z),
                    (x - 1, y, z),
                    (x, y + 1, z),
                    (x, y - 1, z),
                    (x, y, z + 1),
                    (x, y, z - 1),
                ];
                if neighbours.iter().any(|&(a, b, c)| !world.is_voxel_solid(a, b, c)) {
                    exposed.push(d.world_position(x, y, z));
                }
            }
        }
    }
    exposed
}

#[test]
fn instances_are_exactly_the_exposed_voxels() {
    let mut world = VoxelWorld::new(dims(8, 3, 2, 10), Geometry::cube(), MeshingMode::Instanced);
    let mut rng = fastrand::Rng::with_seed(2024);
    let solid: Vec<bool> = (0..24 * 10 * 16).map(|_| rng.u8(0..10) < 7).collect();
    ParallelGenerator::with_workers(3)
        .generate_voxels_parallel(&mut world, move |x, y, z| {
            let index = (x + 24 * (y + 10 * z)) as usize;
            (BlockType::STONE.id(), solid[index])
        })
        .unwrap();

    let mesh = create_instanced_model(&world, &VoxelColorTable::new());
    let instances = mesh.instances.as_ref().unwrap();
    let expected = exposed_voxels(&world);

    assert_eq!(instances.len(), expected.len());
    assert!(instances.len() < world.active_voxels());
    let mut emitted: Vec<_> = instances.transforms.iter().map(|t| t.translation()).collect();
    let mut expected = expected;
    let key = |p: &Point3<f32>| (p.x as i32, p.y as i32, p.z as i32);
    emitted.sort_by_key(key);
    expected.sort_by_key(key);
    assert_eq!(emitted, expected);
    assert_eq!(mesh.vertices, Geometry::cube().vertices);
}

#[test]
fn two_voxels_on_a_two_by_two_world_are_both_visible() {
    let mut world = VoxelWorld::new(dims(2, 2, 2, 2), Geometry::cube(), MeshingMode::Instanced);
    world.set_voxel(0, 0, 0, BlockType::GRASS.id());
    world.set_voxel(1, 0, 0, BlockType::DIRT.id());

    let colors = VoxelColorTable::new();
    let mesh = create_instanced_model(&world, &colors);
    let instances = mesh.instances.unwrap();

    let positions: Vec<_> = instances.transforms.iter().map(|t| t.translation()).collect();
    assert_eq!(
        positions,
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]
    );
    assert_eq!(
        instances.colors,
        vec![
            VoxelColorTable::default_color(BlockType::GRASS.id()),
            VoxelColorTable::default_color(BlockType::DIRT.id()),
        ]
    );
}

#[test]
fn instance_positions_scale_with_voxel_size() {
    let mut dimensions = dims(4, 1, 1, 4);
    dimensions.voxel_size = 0.25;
    let mut world = VoxelWorld::new(dimensions, Geometry::tetrahedron(), MeshingMode::Instanced);
    world.set_voxel(2, 3, 1, 9);

    let mesh = create_instanced_model(&world, &VoxelColorTable::new());
    let instances = mesh.instances.unwrap();
    assert_eq!(instances.transforms[0].translation(), Point3::new(0.5, 0.75, 0.25));
    assert_eq!(instances.colors[0], VoxelColor::FALLBACK_GRAY);
    assert_eq!(mesh.indices.len(), 12);
}

#[test]
fn custom_colors_reset_to_defaults() {
    let mut colors = VoxelColorTable::new();
    let default = colors.get_voxel_color(3);
    colors.set_voxel_color(3, VoxelColor::RED);
    assert_eq!(colors.get_voxel_color(3), VoxelColor::RED);
    colors.clear_custom_voxel_colors();
    assert_eq!(colors.get_voxel_color(3), default);
}

#[test]
fn empty_sdf_world_is_flat_at_the_fallback_height() {
    let world = VoxelWorld::new(dims(4, 2, 3, 32), Geometry::cube(), MeshingMode::SurfaceNets);
    let mesh = create_surface_nets_model(&world).unwrap();

    assert_eq!(mesh.vertices.len(), 8 * 12);
    assert_eq!(mesh.triangle_count(), 2 * 7 * 11);
    for vertex in &mesh.vertices {
        assert_relative_eq!(vertex.position[1], 10.0);
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
    }
}

#[test]
fn heightfield_follows_generated_sdf() {
    let mut world = VoxelWorld::new(dims(8, 2, 2, 24), Geometry::cube(), MeshingMode::SurfaceNets);
    ParallelGenerator::with_workers(2)
        .generate_sdf_parallel(&mut world, |x, y, z| y as f32 - ((x + z) % 20) as f32 - 0.5)
        .unwrap();

    let mesh = create_surface_nets_model(&world).unwrap();
    let width = 16;
    for (x, z) in [(0, 0), (3, 9), (15, 15), (12, 1)] {
        let vertex = mesh.vertices[z * width + x];
        assert_relative_eq!(vertex.position[0], x as f32);
        assert_relative_eq!(vertex.position[1], ((x + z) % 20) as f32);
        assert_relative_eq!(vertex.position[2], z as f32);
        assert_relative_eq!(vertex.tex_coords[0], x as f32 / 15.0);
        assert_relative_eq!(vertex.tex_coords[1], z as f32 / 15.0);
    }
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
}

#[test]
fn zero_column_world_has_no_heightfield() {
    let world = VoxelWorld::new(dims(4, 3, 0, 8), Geometry::cube(), MeshingMode::SurfaceNets);
    assert!(create_surface_nets_model(&world).is_none());
}
