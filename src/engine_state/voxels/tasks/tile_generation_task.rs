//! # Tile Generation Tasks
//!
//! Tasks that evaluate a generation callback over one tile of columns. A tile
//! is a chunk-aligned rectangle of the world's X×Z extent covering the full
//! height. Workers fill a tile-local buffer; the buffer is written into the
//! world when the result is handled on the calling thread.

use std::sync::Arc;

use log::trace;

use crate::engine_state::{
    task_management::task::{Task, TaskReport, TaskResult},
    voxels::{block::VoxelId, world::VoxelWorld},
};

/// Voxel generation callback: `(x, y, z) -> (id, place)`.
pub type VoxelGeneratorFn = dyn Fn(i32, i32, i32) -> (VoxelId, bool) + Send + Sync;

/// SDF generation callback: `(x, y, z) -> distance`, negative inside.
pub type SdfGeneratorFn = dyn Fn(i32, i32, i32) -> f32 + Send + Sync;

/// A rectangle of world columns processed as one task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// World X of the first column
    pub origin_x: usize,
    /// World Z of the first column
    pub origin_z: usize,
    /// Columns along X, clipped to the world
    pub width: usize,
    /// Columns along Z, clipped to the world
    pub depth: usize,
    /// Voxel layers, always the full world height
    pub height: usize,
}

impl Tile {
    /// Number of cells in the tile.
    pub fn cell_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    fn origin(&self) -> (i32, i32) {
        (self.origin_x as i32, self.origin_z as i32)
    }
}

/// Evaluates a voxel callback over a tile.
pub struct VoxelTileTask {
    tile: Tile,
    generator: Arc<VoxelGeneratorFn>,
}

impl VoxelTileTask {
    /// Creates a task for one tile sharing the pass's callback.
    pub fn new(tile: Tile, generator: Arc<VoxelGeneratorFn>) -> Self {
        VoxelTileTask { tile, generator }
    }
}

impl Task for VoxelTileTask {
    fn origin(&self) -> (i32, i32) {
        self.tile.origin()
    }

    fn process(&self) -> Box<dyn TaskResult + Send> {
        let Tile {
            origin_x,
            origin_z,
            width,
            depth,
            height,
        } = self.tile;

        let mut placements = Vec::new();
        for z in origin_z..origin_z + depth {
            for y in 0..height {
                for x in origin_x..origin_x + width {
                    let (x, y, z) = (x as i32, y as i32, z as i32);
                    let (id, place) = (self.generator)(x, y, z);
                    if place {
                        placements.push(([x, y, z], id));
                    }
                }
            }
        }

        trace!(
            "Voxel tile at {:?}: {} placements",
            self.tile.origin(),
            placements.len()
        );

        Box::new(VoxelTileResult {
            cells_visited: self.tile.cell_count(),
            placements,
        })
    }
}

/// Placements produced by a [`VoxelTileTask`].
pub struct VoxelTileResult {
    cells_visited: usize,
    placements: Vec<([i32; 3], VoxelId)>,
}

impl TaskResult for VoxelTileResult {
    fn handle_result(self: Box<Self>, world: &mut VoxelWorld) -> TaskReport {
        for &([x, y, z], id) in &self.placements {
            world.set_voxel(x, y, z, id);
        }
        TaskReport {
            cells_visited: self.cells_visited,
            cells_written: self.placements.len(),
        }
    }
}

/// Evaluates an SDF callback over a tile.
pub struct SdfTileTask {
    tile: Tile,
    generator: Arc<SdfGeneratorFn>,
}

impl SdfTileTask {
    /// Creates a task for one tile sharing the pass's callback.
    pub fn new(tile: Tile, generator: Arc<SdfGeneratorFn>) -> Self {
        SdfTileTask { tile, generator }
    }
}

impl Task for SdfTileTask {
    fn origin(&self) -> (i32, i32) {
        self.tile.origin()
    }

    fn process(&self) -> Box<dyn TaskResult + Send> {
        let Tile {
            origin_x,
            origin_z,
            width,
            depth,
            height,
        } = self.tile;

        // Laid out x + width * (y + height * z), matching `SdfVolume::write_block`.
        let mut samples = Vec::with_capacity(self.tile.cell_count());
        for z in origin_z..origin_z + depth {
            for y in 0..height {
                for x in origin_x..origin_x + width {
                    samples.push((self.generator)(x as i32, y as i32, z as i32));
                }
            }
        }

        Box::new(SdfTileResult {
            tile: self.tile,
            samples,
        })
    }
}

/// Samples produced by an [`SdfTileTask`].
pub struct SdfTileResult {
    tile: Tile,
    samples: Vec<f32>,
}

impl TaskResult for SdfTileResult {
    fn handle_result(self: Box<Self>, world: &mut VoxelWorld) -> TaskReport {
        let cells_visited = self.samples.len();
        let cells_written = match world.sdf_mut() {
            Some(sdf) => {
                sdf.write_block(
                    self.tile.origin_x,
                    self.tile.origin_z,
                    self.tile.width,
                    self.tile.depth,
                    &self.samples,
                );
                cells_visited
            }
            None => 0,
        };
        TaskReport {
            cells_visited,
            cells_written,
        }
    }
}
