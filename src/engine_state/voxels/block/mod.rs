//! # Block Module
//!
//! This module provides the per-voxel data types of the world: the compact
//! voxel type tag, the cell stored in chunk buffers, the well-known block types
//! and the six face directions used for face culling.

use cgmath::Point3;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to tag a voxel's material.
///
/// `0` is reserved for empty space (air); every other value is a solid voxel.
pub type VoxelId = u8;

/// The id of an empty cell.
pub const AIR_ID: VoxelId = 0;

/// A single cell of chunk storage.
///
/// `active` always equals `id != AIR_ID`, and `world_position` is the cached
/// `coordinate * voxel_size` of the cell. Both are rewritten together with
/// `id` by [`VoxelCell::assign`]; nothing else mutates a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelCell {
    /// Whether the cell holds a solid voxel
    pub active: bool,
    /// Material of the voxel, `AIR_ID` when empty
    pub id: VoxelId,
    /// Position of the voxel's minimum corner in world space
    pub world_position: Point3<f32>,
}

impl VoxelCell {
    /// An empty cell at the origin.
    pub const EMPTY: VoxelCell = VoxelCell {
        active: false,
        id: AIR_ID,
        world_position: Point3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
    };

    /// Overwrites the cell, keeping `active` in step with `id`.
    ///
    /// # Returns
    /// The change in active-cell count caused by the write: `1` when an empty
    /// cell became solid, `-1` when a solid cell became empty, `0` otherwise.
    #[inline]
    pub fn assign(&mut self, id: VoxelId, world_position: Point3<f32>) -> i32 {
        let was_active = self.active;
        self.id = id;
        self.active = id != AIR_ID;
        self.world_position = world_position;
        match (was_active, self.active) {
            (false, true) => 1,
            (true, false) => -1,
            _ => 0,
        }
    }
}

impl Default for VoxelCell {
    fn default() -> Self {
        VoxelCell::EMPTY
    }
}
