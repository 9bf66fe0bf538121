//! Mesh data structures shared by the mesh builders.
//!
//! # Architecture
//! - [`Mesh`]: The artifact handed to the renderer, with optional instance data
//! - [`InstanceBuffers`]: Parallel per-instance transform and colour arrays
//! - [`Geometry`]: The primitive an instanced mesh stamps per visible voxel

mod geometry;
#[allow(clippy::module_inception)]
mod mesh;

pub use geometry::Geometry;
pub use mesh::*;
