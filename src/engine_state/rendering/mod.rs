//! Renderer-facing data produced from a voxel world.
//!
//! Nothing in this module talks to a GPU. It produces plain vertex, index and
//! instance arrays (all `bytemuck::Pod`) that any renderer can upload as-is.

pub mod meshing;
mod vertex;

pub use meshing::mesh::{Geometry, InstanceBuffers, Mesh};
pub use vertex::{InstanceTransform, Vertex};
