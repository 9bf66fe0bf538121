#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world core: dense chunk storage, tile-parallel world
//! generation and CPU-side meshing into renderer-ready buffers.
//!
//! ## Key Modules
//!
//! * `config` - JSON world configuration
//! * `core` - Shared-ownership primitives
//! * `engine_state` - Voxel storage, generation, meshing and the `VoxelEngine` facade
//! * `error` - Error types for the fallible, coarse-grained operations
//!
//! ## Architecture
//!
//! The crate is split into:
//! * Storage (`VoxelWorld`, chunks, the optional SDF volume)
//! * Generation (`ParallelGenerator` on a persistent worker pool)
//! * Meshing (instanced cubes with face culling, or an SDF heightfield)
//!
//! Nothing here talks to a GPU: a `Mesh` is plain `bytemuck::Pod` data that
//! any renderer can upload.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_world::{Geometry, MeshingMode, ParallelGenerator, VoxelColorTable, VoxelWorld,
//!     WorldDimensions, create_instanced_model};
//!
//! let dimensions = WorldDimensions {
//!     chunk_size: 4,
//!     world_size_x: 2,
//!     world_size_z: 2,
//!     max_height: 8,
//!     voxel_size: 1.0,
//! };
//! let mut world = VoxelWorld::new(dimensions, Geometry::cube(), MeshingMode::Instanced);
//! ParallelGenerator::with_workers(2)
//!     .generate_voxels_parallel(&mut world, |_, y, _| (3, y < 3))
//!     .unwrap();
//!
//! let mesh = create_instanced_model(&world, &VoxelColorTable::new());
//! // Voxels buried inside the slab are culled.
//! assert!(mesh.instance_count() < world.active_voxels());
//! ```
//!
//! ## Performance Considerations
//!
//! * Each chunk is one flat allocation with a packed occupancy bitmask
//! * Generation runs callbacks on every core and applies results serially
//! * Mesh buffers are sized exactly by a counting pass before they are filled

use log::{error, info};

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;
pub mod terrain;

pub use config::WorldConfig;
pub use engine_state::{
    rendering::{
        meshing::{create_instanced_model, create_surface_nets_model},
        Geometry, InstanceBuffers, InstanceTransform, Mesh, Vertex,
    },
    voxels::{
        block::{block_type::BlockType, VoxelId, AIR_ID},
        color_table::{VoxelColor, VoxelColorTable},
        tasks::{GenerationStats, ParallelGenerator},
        world::{MeshingMode, VoxelWorld, WorldDimensions},
    },
    VoxelEngine,
};
pub use error::{ConfigError, GenerationError, VoxelError};

use terrain::Terrain;

/// Runs the demo: generates noise terrain for the configured world and meshes it.
///
/// The configuration is read from the JSON file named by the first command
/// line argument, or defaults are used. Logging is controlled by `RUST_LOG`.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    if let Err(err) = run_demo(std::env::args().nth(1)) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run_demo(config_path: Option<String>) -> Result<(), VoxelError> {
    let config = match config_path {
        Some(path) => {
            info!("Loading world config from {path}");
            WorldConfig::load(path)?
        }
        None => WorldConfig::default(),
    };

    let mut engine = VoxelEngine::from_config(&config, Geometry::cube())?;
    let terrain = Terrain::new(config.seed, config.max_height);

    match config.mode {
        MeshingMode::Instanced => {
            engine.generate_voxels(move |x, y, z| terrain.voxel(x, y, z))?;
        }
        MeshingMode::SurfaceNets => {
            engine.generate_sdf(move |x, y, z| terrain.distance(x, y, z))?;
        }
    }

    match engine.build_mesh() {
        Some(mesh) => info!(
            "Mesh ready: {} vertices ({} bytes), {} triangles ({} bytes), {} instances",
            mesh.vertices.len(),
            mesh.vertex_bytes().len(),
            mesh.triangle_count(),
            mesh.index_bytes().len(),
            mesh.instance_count()
        ),
        None => info!("World has no data to mesh"),
    }

    Ok(())
}
