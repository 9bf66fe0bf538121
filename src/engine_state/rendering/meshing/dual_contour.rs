//! Dual-contouring building blocks over the SDF volume.
//!
//! These routines place one vertex per surface-crossing cell and stitch
//! neighbouring cell vertices into quads. The heightfield mesher does not use
//! them; they are kept for callers assembling their own isosurface extractor.

use std::collections::HashMap;

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::world::VoxelWorld;

/// Corner offsets of a unit cell.
const CELL_CORNERS: [[i32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// The twelve cell edges as pairs of indices into [`CELL_CORNERS`].
const CELL_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Zero crossing of the field along the edge `p0 → p1`.
///
/// # Returns
/// `None` unless exactly one endpoint is inside (`d < 0`).
pub fn edge_crossing(p0: Point3<f32>, d0: f32, p1: Point3<f32>, d1: f32) -> Option<Point3<f32>> {
    if (d0 < 0.0) == (d1 < 0.0) {
        return None;
    }
    let t = d0 / (d0 - d1);
    Some(p0 + (p1 - p0) * t)
}

/// Dual-contour vertex of the cell whose minimum corner is `(x, y, z)`.
///
/// The vertex is the mean of every edge crossing of the cell, in world units.
/// Corners outside the world read as "outside".
pub fn cell_vertex(world: &VoxelWorld, x: i32, y: i32, z: i32) -> Option<Point3<f32>> {
    let dimensions = world.dimensions();
    let corners = CELL_CORNERS.map(|[dx, dy, dz]| {
        let (cx, cy, cz) = (x + dx, y + dy, z + dz);
        (
            dimensions.world_position(cx, cy, cz),
            world.get_voxel_sdf(cx, cy, cz),
        )
    });

    let mut sum = Vector3::new(0.0, 0.0, 0.0);
    let mut crossings = 0;
    for (a, b) in CELL_EDGES {
        let (p0, d0) = corners[a];
        let (p1, d1) = corners[b];
        if let Some(point) = edge_crossing(p0, d0, p1, d1) {
            sum += point.to_vec();
            crossings += 1;
        }
    }

    (crossings > 0).then(|| Point3::from_vec(sum / crossings as f32))
}

/// Surface normal at a sample from the central-difference gradient.
///
/// Falls back to +Y where the gradient vanishes.
pub fn gradient_normal(world: &VoxelWorld, x: i32, y: i32, z: i32) -> Vector3<f32> {
    let gradient = Vector3::new(
        world.get_voxel_sdf(x + 1, y, z) - world.get_voxel_sdf(x - 1, y, z),
        world.get_voxel_sdf(x, y + 1, z) - world.get_voxel_sdf(x, y - 1, z),
        world.get_voxel_sdf(x, y, z + 1) - world.get_voxel_sdf(x, y, z - 1),
    );
    if gradient.magnitude2() <= f32::EPSILON {
        Vector3::unit_y()
    } else {
        gradient.normalize()
    }
}

/// Joins a sparse `(x, z)` vertex map into a triangle list.
///
/// Two triangles are emitted for every grid cell whose four corners all have
/// a vertex, wound counter-clockwise seen from +Y.
pub fn stitch_quads(vertex_map: &HashMap<(i32, i32), u32>, width: usize, depth: usize) -> Vec<u32> {
    let mut indices = Vec::new();
    for z in 0..depth.saturating_sub(1) as i32 {
        for x in 0..width.saturating_sub(1) as i32 {
            let corners = (
                vertex_map.get(&(x, z)),
                vertex_map.get(&(x + 1, z)),
                vertex_map.get(&(x, z + 1)),
                vertex_map.get(&(x + 1, z + 1)),
            );
            if let (Some(&i0), Some(&i1), Some(&i2), Some(&i3)) = corners {
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }
    }
    indices
}
