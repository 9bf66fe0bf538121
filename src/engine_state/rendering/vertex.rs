//! Vertex and instance data structures handed to the renderer.
//!
//! Both types are `#[repr(C)]` and `bytemuck::Pod`, so a renderer can upload
//! a slice of them with `bytemuck::cast_slice` without copying.

use cgmath::{Matrix4, Point3, Vector3};

/// A vertex of a mesh or geometry primitive.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space (world space for heightfields)
    pub position: [f32; 3],
    /// UV texture coordinates
    pub tex_coords: [f32; 2],
    /// Unit surface normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - The 3D position of the vertex
    /// * `u`, `v` - Texture coordinates
    /// * `normal` - The surface normal at the vertex
    pub fn new(position: Point3<f32>, u: f32, v: f32, normal: Vector3<f32>) -> Self {
        Vertex {
            position: position.into(),
            tex_coords: [u, v],
            normal: normal.into(),
        }
    }

    /// The vertex position as a point.
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }
}

/// Per-instance model matrix, stored column-major.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceTransform {
    /// Column-major 4x4 model matrix
    pub model: [[f32; 4]; 4],
}

impl InstanceTransform {
    /// A translation-only transform placing an instance at `position`.
    pub fn from_translation(position: Point3<f32>) -> Self {
        InstanceTransform {
            model: Matrix4::from_translation(Vector3::new(position.x, position.y, position.z))
                .into(),
        }
    }

    /// The translation component of the transform.
    pub fn translation(&self) -> Point3<f32> {
        let column = self.model[3];
        Point3::new(column[0], column[1], column[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_upload_sizes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::size_of::<InstanceTransform>(), 64);
    }

    #[test]
    fn translation_lands_in_last_column() {
        let transform = InstanceTransform::from_translation(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.translation(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.model[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(transform.model[3][3], 1.0);
    }
}
