//! # Voxel Color Table
//!
//! Maps voxel ids to the display colour the instanced renderer tints each
//! instance with. Built-in defaults are a compile-time perfect hash map; a
//! table layers caller overrides on top of them and can drop every override
//! at once.
//!
//! A table is an ordinary value handed to the mesh builder by reference.
//! Share it across threads by wrapping it in `MtResource`.

use std::collections::HashMap;

use phf::phf_map;

use super::block::VoxelId;

/// A linear RGBA colour, laid out for direct upload as instance data.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelColor {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl VoxelColor {
    /// Opaque black.
    pub const BLACK: VoxelColor = VoxelColor::rgb(0.0, 0.0, 0.0);
    /// Colour used for ids without a default or override.
    pub const FALLBACK_GRAY: VoxelColor = VoxelColor::rgb(0.5, 0.5, 0.5);
    /// Opaque red.
    pub const RED: VoxelColor = VoxelColor::rgb(1.0, 0.0, 0.0);

    /// An opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        VoxelColor { r, g, b, a: 1.0 }
    }

    /// A colour with explicit alpha.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        VoxelColor { r, g, b, a }
    }
}

/// Built-in colours, keyed by `BlockType` id.
static DEFAULT_VOXEL_COLORS: phf::Map<u8, VoxelColor> = phf_map! {
    0u8 => VoxelColor::rgb(0.0, 0.0, 0.0),    // AIR
    1u8 => VoxelColor::rgb(0.33, 0.62, 0.24), // GRASS
    2u8 => VoxelColor::rgb(0.47, 0.33, 0.21), // DIRT
    3u8 => VoxelColor::rgb(0.52, 0.52, 0.55), // STONE
    4u8 => VoxelColor::rgb(0.86, 0.80, 0.56), // SAND
    5u8 => VoxelColor::rgba(0.20, 0.40, 0.85, 0.8), // WATER
    6u8 => VoxelColor::rgb(0.95, 0.96, 0.98), // SNOW
};

/// Palette from voxel id to display colour.
#[derive(Debug, Clone, Default)]
pub struct VoxelColorTable {
    overrides: HashMap<VoxelId, VoxelColor>,
}

impl VoxelColorTable {
    /// A table holding only the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in colour of an id, ignoring overrides.
    pub fn default_color(id: VoxelId) -> VoxelColor {
        DEFAULT_VOXEL_COLORS
            .get(&id)
            .copied()
            .unwrap_or(VoxelColor::FALLBACK_GRAY)
    }

    /// The colour an id is currently drawn with.
    #[inline]
    pub fn get_voxel_color(&self, id: VoxelId) -> VoxelColor {
        match self.overrides.get(&id) {
            Some(color) => *color,
            None => Self::default_color(id),
        }
    }

    /// Overrides the colour of an id until the overrides are cleared.
    pub fn set_voxel_color(&mut self, id: VoxelId, color: VoxelColor) {
        self.overrides.insert(id, color);
    }

    /// Drops every override, restoring the built-in defaults.
    pub fn clear_custom_voxel_colors(&mut self) {
        if !self.overrides.is_empty() {
            log::debug!("Clearing {} custom voxel colors", self.overrides.len());
        }
        self.overrides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn air_is_black_and_unknown_is_gray() {
        let table = VoxelColorTable::new();
        assert_eq!(table.get_voxel_color(BlockType::AIR.id()), VoxelColor::BLACK);
        assert_eq!(table.get_voxel_color(250), VoxelColor::FALLBACK_GRAY);
    }

    #[test]
    fn override_then_clear_restores_default() {
        let mut table = VoxelColorTable::new();
        let original = table.get_voxel_color(3);

        table.set_voxel_color(3, VoxelColor::RED);
        assert_eq!(table.get_voxel_color(3), VoxelColor::RED);

        table.clear_custom_voxel_colors();
        assert_eq!(table.get_voxel_color(3), original);
    }

    #[test]
    fn unknown_ids_can_be_given_colors() {
        let mut table = VoxelColorTable::new();
        table.set_voxel_color(42, VoxelColor::RED);
        assert_eq!(table.get_voxel_color(42), VoxelColor::RED);
        assert_eq!(VoxelColorTable::default_color(42), VoxelColor::FALLBACK_GRAY);
    }
}
