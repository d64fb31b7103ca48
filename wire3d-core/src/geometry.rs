//! Geometry primitives: vertices, indexed faces and screen-space triangles
use nalgebra::{Vector2, Vector3};

use crate::error::MeshError;

/// A triangle face referencing three vertices by 1-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

/// A projected triangle in screen space, rebuilt every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vector2<f32>; 3],
}

impl Triangle {
    pub fn new(p0: Vector2<f32>, p1: Vector2<f32>, p2: Vector2<f32>) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    /// The three closing edges: 0->1, 1->2, 2->0.
    pub fn edges(&self) -> [(Vector2<f32>, Vector2<f32>); 3] {
        let [p0, p1, p2] = self.points;
        [(p0, p1), (p1, p2), (p2, p0)]
    }
}

/// An indexed triangle mesh. Immutable once built.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vector3<f32>>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, checking that every face index is within `1..=vertices.len()`.
    pub fn new(vertices: Vec<Vector3<f32>>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (face_index, face) in faces.iter().enumerate() {
            for index in face.indices() {
                if index == 0 || index as usize > vertex_count {
                    return Err(MeshError::FaceIndexOutOfRange {
                        face: face_index,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Look up the three vertices of a face, or `None` if an index is not
    /// within `1..=vertices.len()`.
    pub fn face_vertices(&self, face: &Face) -> Option<[Vector3<f32>; 3]> {
        let [a, b, c] = face.indices().map(|index| {
            (index as usize)
                .checked_sub(1)
                .and_then(|i| self.vertices.get(i))
                .copied()
        });
        Some([a?, b?, c?])
    }

    /// A cube spanning -1..1 on every axis: 8 vertices, 12 faces.
    pub fn cube() -> Self {
        let vertices = CUBE_VERTICES
            .iter()
            .map(|&[x, y, z]| Vector3::new(x, y, z))
            .collect();
        Self {
            vertices,
            faces: CUBE_FACES.to_vec(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::cube()
    }
}

const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
];

const CUBE_FACES: [Face; 12] = [
    // front
    Face::new(1, 2, 3),
    Face::new(1, 3, 4),
    // right
    Face::new(4, 3, 5),
    Face::new(4, 5, 6),
    // back
    Face::new(6, 5, 7),
    Face::new(6, 7, 8),
    // left
    Face::new(8, 7, 2),
    Face::new(8, 2, 1),
    // top
    Face::new(2, 7, 5),
    Face::new(2, 5, 3),
    // bottom
    Face::new(6, 8, 1),
    Face::new(6, 1, 4),
];
