//! Instanced meshing with face culling.
//!
//! Every active voxel that has at least one face open to air (or to the world
//! edge) becomes one instance of the world's shared geometry primitive.
//! Voxels whose six neighbours are all solid can never be seen and are
//! dropped.
//!
//! The builder makes two passes over the world:
//! 1. a counting pass that sizes the output arrays exactly, and
//! 2. a populating pass that fills them in a fixed order: ascending world Y,
//!    then chunk X, then chunk Z, then local x, then local z. Emission is
//!    layer by layer and reproducible across runs.

use log::info;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::chunk_iteration::ChunkBlockIterator,
    color_table::VoxelColorTable,
    world::VoxelWorld,
};
use crate::engine_state::rendering::InstanceTransform;

use super::mesh::{InstanceBuffers, Mesh};

/// Whether a voxel has at least one face not covered by a solid neighbour.
///
/// Neighbours outside the world count as open air.
#[inline]
pub fn is_voxel_exposed(world: &VoxelWorld, x: i32, y: i32, z: i32) -> bool {
    BlockSide::all().into_iter().any(|side| {
        let offset = side.neighbour_offset();
        !world.is_voxel_solid(x + offset.x, y + offset.y, z + offset.z)
    })
}

/// Counts the active voxels that would be emitted as instances.
pub fn count_visible_voxels(world: &VoxelWorld) -> usize {
    let chunk_size = world.dimensions().chunk_size as i32;
    let mut visible = 0;
    for chunk in world.chunks() {
        let origin_x = chunk.position.x * chunk_size;
        let origin_z = chunk.position.y * chunk_size;
        for (local, _) in ChunkBlockIterator::new(chunk) {
            if is_voxel_exposed(
                world,
                origin_x + local.x as i32,
                local.y as i32,
                origin_z + local.z as i32,
            ) {
                visible += 1;
            }
        }
    }
    visible
}

/// Builds the instanced mesh of a world.
///
/// # Arguments
/// * `world` - The world to mesh; it cannot change while the borrow is held
/// * `colors` - Palette used to tint each instance
///
/// # Returns
/// A `Mesh` whose vertex and index buffers are the world's geometry primitive
/// and whose instance arrays hold one entry per visible voxel.
///
/// # Panics
/// Panics if the populating pass emits a different number of instances than
/// the counting pass found. That can only happen through an internal bug.
pub fn create_instanced_model(world: &VoxelWorld, colors: &VoxelColorTable) -> Mesh {
    let start = Instant::now();
    let dimensions = world.dimensions();
    let chunk_size = dimensions.chunk_size;

    let visible = count_visible_voxels(world);
    let mut instances = InstanceBuffers::with_capacity(visible);

    for y in 0..dimensions.max_height {
        for cx in 0..dimensions.world_size_x {
            for cz in 0..dimensions.world_size_z {
                let chunk = &world.chunks()[cx + cz * dimensions.world_size_x];
                for (local, cell) in ChunkBlockIterator::layer(chunk, y) {
                    let x = (cx * chunk_size + local.x) as i32;
                    let z = (cz * chunk_size + local.z) as i32;
                    if !is_voxel_exposed(world, x, y as i32, z) {
                        continue;
                    }
                    instances
                        .transforms
                        .push(InstanceTransform::from_translation(cell.world_position));
                    instances.colors.push(colors.get_voxel_color(cell.id));
                }
            }
        }
    }

    assert_eq!(
        instances.len(),
        visible,
        "instanced mesh populate pass diverged from count pass"
    );

    info!(
        "Instanced mesh: {} of {} active voxels visible, built in {:?}",
        visible,
        world.active_voxels(),
        start.elapsed()
    );

    let geometry = world.geometry();
    Mesh {
        vertices: geometry.vertices.clone(),
        indices: geometry.indices.clone(),
        instances: Some(instances),
    }
}
