//! Geometry primitives stamped once per instance.
//!
//! The instanced backend draws one shared unit primitive for every visible
//! voxel. Renderers may supply any primitive; a unit cube and a tetrahedron
//! are provided here for convenience.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::rendering::Vertex;

/// A shared primitive: interleaved vertices plus a triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Interleaved position/uv/normal vertices
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Wraps caller-built buffers.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        Geometry { vertices, indices }
    }

    /// A unit cube spanning `[0, 1]³`, four vertices per face so every face
    /// gets a flat normal.
    pub fn cube() -> Self {
        // (normal, origin corner, u axis, v axis), wound counter-clockwise
        // when viewed from outside.
        let faces: [([f32; 3], [f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, -1.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, origin, u_axis, v_axis) in faces {
            let normal = Vector3::from(normal);
            let origin = Point3::from(origin);
            let u_axis = Vector3::from(u_axis);
            let v_axis = Vector3::from(v_axis);
            let base = vertices.len() as u32;

            vertices.push(Vertex::new(origin, 0.0, 1.0, normal));
            vertices.push(Vertex::new(origin + u_axis, 1.0, 1.0, normal));
            vertices.push(Vertex::new(origin + u_axis + v_axis, 1.0, 0.0, normal));
            vertices.push(Vertex::new(origin + v_axis, 0.0, 0.0, normal));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Geometry { vertices, indices }
    }

    /// A regular-ish tetrahedron inscribed in the unit cube.
    pub fn tetrahedron() -> Self {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let centroid = Point3::new(0.5, 0.5, 0.5);
        let faces = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];

        let mut vertices = Vec::with_capacity(12);
        let mut indices = Vec::with_capacity(12);
        for face in faces {
            let [a, b, c] = face.map(|i| corners[i]);
            let mut normal = (b - a).cross(c - a).normalize();
            let mut order = [a, b, c];
            // Flip faces whose normal points towards the centre.
            if normal.dot(a - centroid) < 0.0 {
                normal = -normal;
                order = [a, c, b];
            }
            let base = vertices.len() as u32;
            let uvs = [(0.0, 1.0), (1.0, 1.0), (0.5, 0.0)];
            for (corner, (u, v)) in order.into_iter().zip(uvs) {
                vertices.push(Vertex::new(corner, u, v, normal));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        Geometry { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(geometry: &Geometry, centre: Point3<f32>) {
        for triangle in geometry.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| geometry.vertices[triangle[i] as usize].position());
            let winding_normal = (b - a).cross(c - a);
            let stored_normal = Vector3::from(geometry.vertices[triangle[0] as usize].normal);
            assert!(winding_normal.dot(stored_normal) > 0.0);
            assert!(stored_normal.dot(a - centre) > 0.0);
        }
    }

    #[test]
    fn cube_faces_wind_outwards() {
        let cube = Geometry::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube
            .vertices
            .iter()
            .all(|v| v.position.iter().all(|&c| c == 0.0 || c == 1.0)));
        assert_outward(&cube, Point3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn tetrahedron_faces_wind_outwards() {
        let tetrahedron = Geometry::tetrahedron();
        assert_eq!(tetrahedron.indices.len(), 12);
        assert_outward(&tetrahedron, Point3::new(0.5, 0.5, 0.5));
    }
}
