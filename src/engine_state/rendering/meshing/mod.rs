//! Mesh builders turning a voxel world into renderer-ready buffers.
//!
//! # Architecture
//! - [`instanced`]: One shared primitive per visible voxel, with face culling
//! - [`heightfield`]: A continuous grid mesh from per-column SDF scans
//! - [`dual_contour`]: Cell-vertex and quad-stitching helpers over the SDF
//! - [`mesh`]: The `Mesh` artifact and the instanced primitive
//!
//! Builders borrow the world immutably and never mutate it, so a world cannot
//! be regenerated while a mesh is being built from it.

pub mod dual_contour;
pub mod heightfield;
pub mod instanced;
pub mod mesh;

pub use heightfield::create_surface_nets_model;
pub use instanced::create_instanced_model;
