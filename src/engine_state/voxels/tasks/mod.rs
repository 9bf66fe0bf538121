//! # Parallel World Generation
//!
//! This module fills a world by evaluating a user callback for every cell,
//! spreading the work across the worker pool in 32×32 column tiles.
//!
//! ## Architecture
//!
//! * [`ParallelGenerator`] owns the worker pool and splits the world into tiles
//! * [`tile_generation_task`] holds the per-tile tasks and their results
//!
//! ## Reduce Pattern
//!
//! Workers never write to the world. Each tile evaluates the callback into a
//! private buffer and returns it; the calling thread applies the buffers one
//! at a time as they arrive. Writes are position-addressed and tiles are
//! disjoint, so the final world does not depend on completion order, and the
//! world's active voxel count is maintained exactly by the ordinary
//! `set_voxel` path.

pub mod tile_generation_task;

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use web_time::Instant;

use crate::engine_state::task_management::{task::Task, TaskManager};
use crate::error::GenerationError;

use super::block::VoxelId;
use super::world::{MeshingMode, VoxelWorld};
use tile_generation_task::{SdfTileTask, Tile, VoxelTileTask};

/// Nominal tile edge in columns.
pub const TILE_SIZE: usize = 32;

/// Tile edge used for a given chunk size: [`TILE_SIZE`] rounded up to a whole
/// number of chunks, so no chunk is ever split between two tiles.
pub fn tile_extent(chunk_size: usize) -> usize {
    let chunk_size = chunk_size.max(1);
    TILE_SIZE.div_ceil(chunk_size) * chunk_size
}

/// Splits a world's column extent into chunk-aligned tiles, row by row.
pub fn tiles_for(world: &VoxelWorld) -> Vec<Tile> {
    let dimensions = world.dimensions();
    let edge = tile_extent(dimensions.chunk_size);
    let (extent_x, extent_z) = (dimensions.extent_x(), dimensions.extent_z());

    let mut tiles = Vec::new();
    for origin_z in (0..extent_z).step_by(edge) {
        for origin_x in (0..extent_x).step_by(edge) {
            assert!(
                origin_x % dimensions.chunk_size == 0 && origin_z % dimensions.chunk_size == 0,
                "tile origin ({origin_x}, {origin_z}) is not chunk aligned"
            );
            tiles.push(Tile {
                origin_x,
                origin_z,
                width: edge.min(extent_x - origin_x),
                depth: edge.min(extent_z - origin_z),
                height: dimensions.max_height,
            });
        }
    }
    tiles
}

/// Summary of one generation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Tiles dispatched
    pub tiles: usize,
    /// Cells the callback was evaluated for
    pub cells_visited: usize,
    /// Cells written back (placed voxels or SDF samples)
    pub cells_written: usize,
    /// Wall-clock time of the pass
    pub elapsed: Duration,
}

/// Fills worlds in parallel on a persistent worker pool.
///
/// # Examples
///
/// ```
/// use voxel_world::{Geometry, MeshingMode, ParallelGenerator, VoxelWorld, WorldDimensions};
///
/// let dimensions = WorldDimensions {
///     chunk_size: 8,
///     world_size_x: 2,
///     world_size_z: 2,
///     max_height: 8,
///     voxel_size: 1.0,
/// };
/// let mut world = VoxelWorld::new(dimensions, Geometry::cube(), MeshingMode::Instanced);
/// let mut generator = ParallelGenerator::with_workers(2);
///
/// let stats = generator
///     .generate_voxels_parallel(&mut world, |_, y, _| (3, y < 2))
///     .unwrap();
/// assert_eq!(stats.cells_written, 16 * 16 * 2);
/// assert_eq!(world.active_voxels(), 16 * 16 * 2);
/// ```
pub struct ParallelGenerator {
    task_manager: TaskManager,
}

impl Default for ParallelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelGenerator {
    /// Creates a generator with one worker per available hardware thread.
    pub fn new() -> Self {
        ParallelGenerator {
            task_manager: TaskManager::with_available_parallelism(),
        }
    }

    /// Creates a generator with a fixed number of workers.
    pub fn with_workers(num_workers: usize) -> Self {
        ParallelGenerator {
            task_manager: TaskManager::new(num_workers),
        }
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.task_manager.worker_count()
    }

    /// Fills the voxel grid from a callback evaluated for every cell.
    ///
    /// `generator_fn(x, y, z)` returns `(id, place)`; cells with
    /// `place == false` are left untouched. Returns once every tile has been
    /// applied.
    ///
    /// # Errors
    /// `WorkerPanicked` if the callback panicked in any tile. Tiles that
    /// completed are still applied.
    pub fn generate_voxels_parallel<F>(
        &mut self,
        world: &mut VoxelWorld,
        generator_fn: F,
    ) -> Result<GenerationStats, GenerationError>
    where
        F: Fn(i32, i32, i32) -> (VoxelId, bool) + Send + Sync + 'static,
    {
        let generator: Arc<tile_generation_task::VoxelGeneratorFn> = Arc::new(generator_fn);
        let tasks = tiles_for(world)
            .into_iter()
            .map(|tile| {
                Box::new(VoxelTileTask::new(tile, Arc::clone(&generator))) as Box<dyn Task + Send>
            })
            .collect();
        self.run("voxel", world, tasks)
    }

    /// Fills the SDF volume from a callback evaluated for every cell.
    ///
    /// # Errors
    /// - `SdfUnavailable` if the world is not in surface-nets mode; no work is dispatched
    /// - `WorkerPanicked` if the callback panicked in any tile
    pub fn generate_sdf_parallel<F>(
        &mut self,
        world: &mut VoxelWorld,
        noise_fn: F,
    ) -> Result<GenerationStats, GenerationError>
    where
        F: Fn(i32, i32, i32) -> f32 + Send + Sync + 'static,
    {
        if world.mode() != MeshingMode::SurfaceNets || world.sdf().is_none() {
            warn!("SDF generation requested on a {:?} world", world.mode());
            return Err(GenerationError::SdfUnavailable);
        }

        let generator: Arc<tile_generation_task::SdfGeneratorFn> = Arc::new(noise_fn);
        let tasks = tiles_for(world)
            .into_iter()
            .map(|tile| {
                Box::new(SdfTileTask::new(tile, Arc::clone(&generator))) as Box<dyn Task + Send>
            })
            .collect();
        self.run("SDF", world, tasks)
    }

    fn run(
        &mut self,
        label: &str,
        world: &mut VoxelWorld,
        tasks: Vec<Box<dyn Task + Send>>,
    ) -> Result<GenerationStats, GenerationError> {
        let start = Instant::now();
        let mut stats = GenerationStats {
            tiles: tasks.len(),
            ..GenerationStats::default()
        };

        self.task_manager.run_to_completion(tasks, |result| {
            let report = result.handle_result(world);
            stats.cells_visited += report.cells_visited;
            stats.cells_written += report.cells_written;
        })?;

        stats.elapsed = start.elapsed();
        info!(
            "Generated {} tiles of {label} data on {} workers: {} cells visited, {} written in {:?}",
            stats.tiles,
            self.task_manager.worker_count(),
            stats.cells_visited,
            stats.cells_written,
            stats.elapsed
        );
        Ok(stats)
    }
}
