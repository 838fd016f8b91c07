pub mod mesh;
pub mod point;
pub mod rotation;
pub mod triangles;
pub mod vector;

/// Geometric precision
const EPS: f64 = 1e-13;

/// Scalar closeness check used across the geometry code.
pub trait IsClose {
    fn is_close(&self, other: f64) -> bool;
}

impl IsClose for f64 {
    fn is_close(&self, other: f64) -> bool {
        (self - other).abs() < EPS
    }
}
