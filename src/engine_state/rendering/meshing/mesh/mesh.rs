//! Mesh artifact produced by the mesh builders.
//!
//! A `Mesh` is a snapshot: it is built from a world on request and never
//! updated afterwards. Rebuild it after mutating the world.

use crate::engine_state::rendering::{InstanceTransform, Vertex};
use crate::engine_state::voxels::color_table::VoxelColor;

/// Parallel per-instance arrays of an instanced mesh.
///
/// `transforms[i]` and `colors[i]` describe the same instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceBuffers {
    /// Translation-only model matrix per instance
    pub transforms: Vec<InstanceTransform>,
    /// Palette colour per instance
    pub colors: Vec<VoxelColor>,
}

impl InstanceBuffers {
    /// Empty buffers with room for `count` instances.
    pub fn with_capacity(count: usize) -> Self {
        InstanceBuffers {
            transforms: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
        }
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.transforms.len(), self.colors.len());
        self.transforms.len()
    }

    /// Whether there are no instances.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Geometry ready for upload: an interleaved vertex buffer, a triangle list
/// index buffer and, for instanced meshes, the per-instance arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Interleaved position/uv/normal vertices
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
    /// Present only for instanced meshes
    pub instances: Option<InstanceBuffers>,
}

impl Mesh {
    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of instances, `0` for non-instanced meshes.
    pub fn instance_count(&self) -> usize {
        self.instances.as_ref().map_or(0, InstanceBuffers::len)
    }

    /// The vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
