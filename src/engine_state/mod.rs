//! # Engine State Module
//!
//! The facade tying a world, its generator and its colour table together.
//!
//! ## Key Components
//!
//! * `VoxelEngine` - Owns one world and everything needed to fill and mesh it
//! * `rendering` - Mesh builders and renderer-facing buffer types
//! * `task_management` - The worker pool used for parallel generation
//! * `voxels` - Voxel storage, the SDF volume, colours and generation tasks
//!
//! ## Architecture
//!
//! `VoxelEngine` is a thin coordinator. The world and the mesh builders can be
//! used directly; the facade adds configuration loading, a shared colour table
//! and dispatch to the mesh backend chosen by the world's meshing mode.

use log::info;

use crate::config::WorldConfig;
use crate::core::MtResource;
use crate::error::{ConfigError, GenerationError};

use rendering::{
    meshing::{create_instanced_model, create_surface_nets_model},
    Geometry, Mesh,
};
use voxels::{
    block::VoxelId,
    color_table::VoxelColorTable,
    tasks::{GenerationStats, ParallelGenerator},
    world::{MeshingMode, VoxelWorld},
};

pub mod rendering;
pub mod task_management;
pub mod voxels;

/// A world together with its generator and colour table.
///
/// # Examples
///
/// ```
/// use voxel_world::{Geometry, VoxelEngine, WorldConfig};
///
/// let config = WorldConfig::from_json_str(
///     r#"{ "chunk_size": 4, "world_size_x": 2, "world_size_z": 2, "max_height": 4 }"#,
/// )
/// .unwrap();
/// let mut engine = VoxelEngine::from_config(&config, Geometry::cube()).unwrap();
///
/// engine.generate_voxels(|_, y, _| (1, y == 0)).unwrap();
/// let mesh = engine.build_mesh().unwrap();
/// assert_eq!(mesh.instance_count(), 64);
/// ```
pub struct VoxelEngine {
    world: VoxelWorld,
    generator: ParallelGenerator,
    colors: MtResource<VoxelColorTable>,
}

impl VoxelEngine {
    /// Wraps an existing world with a default generator and colour table.
    pub fn new(world: VoxelWorld) -> Self {
        VoxelEngine {
            world,
            generator: ParallelGenerator::new(),
            colors: MtResource::new(VoxelColorTable::new()),
        }
    }

    /// Validates a configuration and allocates its world.
    ///
    /// # Errors
    /// `ConfigError::InvalidDimension` if any dimension is unusable.
    pub fn from_config(config: &WorldConfig, geometry: Geometry) -> Result<Self, ConfigError> {
        let world = VoxelWorld::from_config(config, geometry)?;
        info!(
            "Created {:?} world of {}x{}x{} voxels",
            world.mode(),
            world.dimensions().extent_x(),
            world.dimensions().max_height,
            world.dimensions().extent_z()
        );
        Ok(Self::new(world))
    }

    /// Replaces the worker pool, e.g. to pin the worker count.
    pub fn with_generator(mut self, generator: ParallelGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// The world.
    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    /// Mutable access to the world.
    pub fn world_mut(&mut self) -> &mut VoxelWorld {
        &mut self.world
    }

    /// A handle to the shared colour table.
    pub fn colors(&self) -> MtResource<VoxelColorTable> {
        self.colors.clone()
    }

    /// Fills the voxel grid in parallel. See
    /// [`ParallelGenerator::generate_voxels_parallel`].
    pub fn generate_voxels<F>(&mut self, generator_fn: F) -> Result<GenerationStats, GenerationError>
    where
        F: Fn(i32, i32, i32) -> (VoxelId, bool) + Send + Sync + 'static,
    {
        self.generator
            .generate_voxels_parallel(&mut self.world, generator_fn)
    }

    /// Fills the SDF volume in parallel. See
    /// [`ParallelGenerator::generate_sdf_parallel`].
    pub fn generate_sdf<F>(&mut self, noise_fn: F) -> Result<GenerationStats, GenerationError>
    where
        F: Fn(i32, i32, i32) -> f32 + Send + Sync + 'static,
    {
        self.generator.generate_sdf_parallel(&mut self.world, noise_fn)
    }

    /// Builds a mesh with the backend matching the world's meshing mode.
    ///
    /// # Returns
    /// `None` only when the heightfield backend has no columns to mesh.
    pub fn build_mesh(&self) -> Option<Mesh> {
        match self.world.mode() {
            MeshingMode::Instanced => {
                let colors = self.colors.get();
                Some(create_instanced_model(&self.world, &colors))
            }
            MeshingMode::SurfaceNets => create_surface_nets_model(&self.world),
        }
    }
}
