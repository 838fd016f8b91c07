use serde::{Deserialize, Serialize};

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

/// Splits a polygonal face into a triangle fan anchored at the first vertex.
///
/// Mesh formats like OBJ and PLY allow faces with more than 3 vertices.
/// Both assets used here (the box is built internally, the buildings and
/// spider faces are convex), so a simple fan is sufficient - no ear clipping.
/// Faces with fewer than 3 vertices yield no triangles.
pub fn fan_triangulate(face: &[usize]) -> Vec<TriangleIndex> {
    if face.len() < 3 {
        return Vec::new();
    }
    let mut triangles: Vec<TriangleIndex> = Vec::with_capacity(face.len() - 2);
    for i in 1..face.len() - 1 {
        triangles.push(TriangleIndex(face[0], face[i], face[i + 1]));
    }
    triangles
}
