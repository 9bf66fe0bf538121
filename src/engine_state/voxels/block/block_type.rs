//! # Block Type Module
//!
//! This module names the voxel ids the engine ships defaults for. Worlds are
//! free to store any other id; those simply have no built-in name or colour.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::VoxelId;

/// Enumerates the block types with built-in palette entries.
///
/// The discriminant of each variant is the `VoxelId` stored in the world.
/// The `FromPrimitive` derive allows converting an id back to a named type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space.
    AIR = 0,

    /// Grass-covered surface layer.
    GRASS = 1,

    /// Dirt found just beneath the surface.
    DIRT = 2,

    /// Bedrock and mountain cores.
    STONE = 3,

    /// Beaches and shallow floors.
    SAND = 4,

    /// Standing water below sea level.
    WATER = 5,

    /// Caps on high peaks.
    SNOW = 6,
}

impl BlockType {
    /// Converts a stored voxel id to a named block type.
    ///
    /// # Returns
    /// `None` when the id has no built-in name.
    pub fn from_id(id: VoxelId) -> Option<Self> {
        FromPrimitive::from_u8(id)
    }

    /// The voxel id this block type is stored as.
    #[inline]
    pub fn id(self) -> VoxelId {
        self as VoxelId
    }
}
