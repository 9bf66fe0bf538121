//! Perlin-noise terrain used by the demo runner.
//!
//! The same height function drives both backends: the instanced backend gets
//! layered voxels (grass over dirt over stone, sand near the floor, snow on
//! peaks), the heightfield backend gets the signed vertical distance to the
//! surface.

use noise::{NoiseFn, Perlin};

use crate::engine_state::voxels::block::{block_type::BlockType, VoxelId};

/// Horizontal frequency of the height noise, in cycles per voxel.
const FREQUENCY: f64 = 1.0 / 48.0;

/// Layers of dirt between the surface and the stone below.
const DIRT_DEPTH: i32 = 3;

/// Seeded terrain height function.
#[derive(Clone)]
pub struct Terrain {
    perlin: Perlin,
    max_height: usize,
}

impl Terrain {
    /// Creates terrain for a world `max_height` voxels tall.
    pub fn new(seed: u32, max_height: usize) -> Self {
        Terrain {
            perlin: Perlin::new(seed),
            max_height,
        }
    }

    /// Surface height of column `(x, z)`, between a quarter and three
    /// quarters of the world height.
    pub fn height(&self, x: i32, z: i32) -> f64 {
        let noise = self.perlin.get([x as f64 * FREQUENCY, z as f64 * FREQUENCY]);
        let max = self.max_height as f64;
        (0.5 + 0.25 * noise.clamp(-1.0, 1.0)) * max
    }

    /// Voxel at `(x, y, z)` as `(id, place)`.
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> (VoxelId, bool) {
        let surface = self.height(x, z).floor() as i32;
        if y > surface {
            return (BlockType::AIR.id(), false);
        }

        let max = self.max_height as i32;
        let block = if y < surface - DIRT_DEPTH {
            BlockType::STONE
        } else if y < surface {
            BlockType::DIRT
        } else if surface >= max * 7 / 10 {
            BlockType::SNOW
        } else if surface <= max * 3 / 10 {
            BlockType::SAND
        } else {
            BlockType::GRASS
        };
        (block.id(), true)
    }

    /// Signed distance to the surface along Y, negative below it.
    pub fn distance(&self, x: i32, y: i32, z: i32) -> f32 {
        (y as f64 - self.height(x, z)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_stay_inside_the_world() {
        let terrain = Terrain::new(7, 64);
        for x in (-200..200).step_by(13) {
            for z in (-200..200).step_by(17) {
                let height = terrain.height(x, z);
                assert!((16.0..=48.0).contains(&height));
            }
        }
    }

    #[test]
    fn voxels_and_distance_agree() {
        let terrain = Terrain::new(3, 32);
        for (x, z) in [(0, 0), (10, 5), (31, 17)] {
            let surface = terrain.height(x, z).floor() as i32;
            assert!(terrain.voxel(x, surface, z).1);
            assert!(!terrain.voxel(x, surface + 1, z).1);
            assert!(terrain.distance(x, surface - 1, z) < 0.0);
            assert!(terrain.distance(x, surface + 1, z) > 0.0);
            assert_eq!(terrain.voxel(x, 0, z).0, BlockType::STONE.id());
        }
    }
}
