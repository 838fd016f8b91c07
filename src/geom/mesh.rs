//! Triangle mesh with the in-place affine operations used by the scene.

use crate::Point;
use crate::TriangleIndex;
use crate::Vector;
use crate::geom::point::bounding_box;
use crate::geom::rotation::{Axis, rotate_points_about_axis};
use crate::geom::triangles::fan_triangulate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A triangle mesh defined by vertices and optional face indices.
///
/// When `faces` is `None` the mesh represents a point cloud only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces: Option<Vec<TriangleIndex>>,
}

impl Mesh {
    /// Creates a new mesh with the given vertices and optional faces.
    pub fn new(vertices: Vec<Point>, faces: Option<Vec<TriangleIndex>>) -> Self {
        Self { vertices, faces }
    }

    /// Returns a reference to the vertices.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns a reference to the faces if present.
    pub fn faces(&self) -> Option<&[TriangleIndex]> {
        self.faces.as_deref()
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces (triangles).
    pub fn face_count(&self) -> usize {
        self.faces.as_ref().map_or(0, |f| f.len())
    }

    /// Multiplies every vertex coordinate by `scale`, in place.
    pub fn scale(&mut self, scale: f64) {
        for p in self.vertices.iter_mut() {
            *p = p.scale(scale);
        }
    }

    /// Adds `v` to every vertex, in place.
    pub fn translate(&mut self, v: Vector) {
        for p in self.vertices.iter_mut() {
            *p = *p + v;
        }
    }

    /// Rotates every vertex by `degrees` around the world `axis` through the
    /// origin, in place. Rotations are order-dependent and do not commute.
    pub fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.vertices = rotate_points_about_axis(&self.vertices, axis, degrees);
    }

    pub fn rotate_x(&mut self, degrees: f64) {
        self.rotate(Axis::X, degrees);
    }

    pub fn rotate_y(&mut self, degrees: f64) {
        self.rotate(Axis::Y, degrees);
    }

    pub fn rotate_z(&mut self, degrees: f64) {
        self.rotate(Axis::Z, degrees);
    }

    /// Returns the min and max corners of the mesh bounding box.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        bounding_box(&self.vertices)
    }

    /// Returns an axis-aligned cuboid with dimensions `x`, `y`, `z`.
    ///
    /// The corner `(min(x), min(y), min(z))` is located at `origin`
    /// (the world origin if not given). Each of the 6 quads is fanned into
    /// 2 triangles with outward-facing winding; corners are shared, so the
    /// mesh has 8 vertices and 12 faces.
    pub fn from_box(x: f64, y: f64, z: f64, origin: Option<(f64, f64, f64)>) -> Self {
        let origin_vec = match origin {
            Some((dx, dy, dz)) => Vector::new(dx, dy, dz),
            None => Vector::new(0., 0., 0.),
        };

        let vertices = vec![
            Point::new(0., 0., 0.) + origin_vec,
            Point::new(x, 0., 0.) + origin_vec,
            Point::new(x, y, 0.) + origin_vec,
            Point::new(0., y, 0.) + origin_vec,
            Point::new(0., 0., z) + origin_vec,
            Point::new(x, 0., z) + origin_vec,
            Point::new(x, y, z) + origin_vec,
            Point::new(0., y, z) + origin_vec,
        ];

        // Quads wound counter-clockwise when seen from outside the box
        let quads: [[usize; 4]; 6] = [
            [0, 3, 2, 1], // floor
            [0, 1, 5, 4], // front (ymin)
            [1, 2, 6, 5], // right (xmax)
            [2, 3, 7, 6], // back (ymax)
            [3, 0, 4, 7], // left (xmin)
            [4, 5, 6, 7], // ceiling
        ];
        let faces: Vec<TriangleIndex> = quads.iter().flat_map(|q| fan_triangulate(q)).collect();

        Self {
            vertices,
            faces: Some(faces),
        }
    }

    /// Returns a box with edge length 1 centered at the origin.
    ///
    /// The spider-on-a-box unit cell rotates around the origin, so the box
    /// must be centered there.
    pub fn unit_box() -> Self {
        Self::from_box(1., 1., 1., Some((-0.5, -0.5, -0.5)))
    }

    /// Returns a new mesh with duplicate vertices merged.
    ///
    /// Vertices are considered identical when they quantize to the same
    /// `(i64, i64, i64)` key at 1e9 scale (~1 nm precision). Face indices
    /// are remapped accordingly. If no faces are present, returns self
    /// unchanged.
    pub fn deduplicate_vertices(self) -> Self {
        let faces = match self.faces {
            Some(ref f) => f,
            None => return self,
        };

        const SCALE: f64 = 1e9;

        let mut key_map: HashMap<(i64, i64, i64), usize> = HashMap::new();
        let mut new_vertices: Vec<Point> = Vec::new();
        let mut old_to_new: Vec<usize> = Vec::with_capacity(self.vertices.len());

        for p in &self.vertices {
            let key = (
                (p.x * SCALE).round() as i64,
                (p.y * SCALE).round() as i64,
                (p.z * SCALE).round() as i64,
            );
            let new_idx = match key_map.get(&key) {
                Some(&idx) => idx,
                None => {
                    let idx = new_vertices.len();
                    new_vertices.push(*p);
                    key_map.insert(key, idx);
                    idx
                }
            };
            old_to_new.push(new_idx);
        }

        let new_faces: Vec<TriangleIndex> = faces
            .iter()
            .map(|t| TriangleIndex(old_to_new[t.0], old_to_new[t.1], old_to_new[t.2]))
            .collect();

        Self {
            vertices: new_vertices,
            faces: Some(new_faces),
        }
    }
}
