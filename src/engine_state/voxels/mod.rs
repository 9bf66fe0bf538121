//! # Voxel Storage and Generation
//!
//! This module holds the data side of the engine: what a voxel is, how voxels
//! are stored, and how a world is filled.
//!
//! ## Architecture
//!
//! * **Block**: Voxel ids, the well-known block types and cube faces
//! * **Chunk**: Fixed-size dense 3D arrays of cells with an occupancy bitmask
//! * **World**: The fixed grid of chunks plus the optional SDF volume
//! * **SDF**: Dense signed distance samples for the heightfield backend
//! * **Color table**: Per-id render colours with compile-time defaults
//! * **Tasks**: Tile-parallel generation on the worker pool
//!
//! ## Data Flow
//!
//! 1. A world is allocated once with every chunk in place
//! 2. The parallel generator evaluates a callback over 32×32 column tiles
//! 3. Tile results are written back on the calling thread
//! 4. A mesh builder borrows the finished world and emits buffers
//!
//! ## Thread Safety
//!
//! Worker threads never touch the world. They only evaluate the generation
//! callback into tile-local buffers, so every world mutation happens on the
//! thread that owns the world and the active voxel count stays exact.

pub mod block;
pub mod chunk;
pub mod color_table;
pub mod sdf;
pub mod tasks;
pub mod world;
