//! Heightfield extraction from the SDF volume.
//!
//! Each `(x, z)` column of the world is scanned from the top down; the first
//! sample inside the surface (negative) gives the column's height. Columns
//! with no crossing sit at [`FALLBACK_HEIGHT`]. The columns are joined into a
//! single continuous grid mesh, two triangles per cell.
//!
//! This is a heightfield, not an isosurface: overhangs and caves in the SDF
//! collapse onto the topmost crossing of their column. The standalone
//! routines in `dual_contour` are the building blocks for a full isosurface
//! extractor and are not used here.

use cgmath::{Point3, Vector3};
use log::info;
use web_time::Instant;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::world::VoxelWorld;

use super::mesh::Mesh;

/// Height, in voxels, given to columns without a surface crossing.
pub const FALLBACK_HEIGHT: usize = 10;

/// Finds the height of a column: the highest Y with a negative SDF sample.
pub fn column_height(world: &VoxelWorld, x: i32, z: i32) -> usize {
    (0..world.dimensions().max_height)
        .rev()
        .find(|&y| world.get_voxel_sdf(x, y as i32, z) < 0.0)
        .unwrap_or(FALLBACK_HEIGHT)
}

/// Builds the heightfield mesh of a world.
///
/// Vertices are emitted row by row (`index = z * width + x`), each at
/// `(x, height, z) * voxel_size` with an up-facing normal and a UV spanning
/// `[0, 1]²` across the world. Triangles wind counter-clockwise seen from
/// above.
///
/// # Returns
/// `None` when the world has no columns, so there is nothing to mesh.
pub fn create_surface_nets_model(world: &VoxelWorld) -> Option<Mesh> {
    let start = Instant::now();
    let dimensions = world.dimensions();
    let width = dimensions.extent_x();
    let depth = dimensions.extent_z();
    if width == 0 || depth == 0 {
        info!("Heightfield mesh: world has no columns, nothing to build");
        return None;
    }

    let voxel_size = dimensions.voxel_size;
    let u_scale = 1.0 / (width.max(2) - 1) as f32;
    let v_scale = 1.0 / (depth.max(2) - 1) as f32;
    let up = Vector3::new(0.0, 1.0, 0.0);

    let mut vertices = Vec::with_capacity(width * depth);
    for z in 0..depth {
        for x in 0..width {
            let height = column_height(world, x as i32, z as i32);
            let position = Point3::new(
                x as f32 * voxel_size,
                height as f32 * voxel_size,
                z as f32 * voxel_size,
            );
            vertices.push(Vertex::new(
                position,
                x as f32 * u_scale,
                z as f32 * v_scale,
                up,
            ));
        }
    }

    let quads = (width - 1) * (depth - 1);
    let mut indices = Vec::with_capacity(quads * 6);
    for z in 0..depth - 1 {
        for x in 0..width - 1 {
            let i0 = (z * width + x) as u32;
            let i1 = i0 + 1;
            let i2 = i0 + width as u32;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    info!(
        "Heightfield mesh: {} vertices, {} triangles, built in {:?}",
        vertices.len(),
        indices.len() / 3,
        start.elapsed()
    );

    Some(Mesh {
        vertices,
        indices,
        instances: None,
    })
}
