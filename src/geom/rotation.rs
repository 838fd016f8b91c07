use crate::Point;
use crate::Vector;
use crate::geom::IsClose;
use crate::geom::point::convert::{array_to_points, points_to_array};
use ndarray as nd;
use serde::{Deserialize, Serialize};

/// A world axis of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit_vector(&self) -> Vector {
        match self {
            Axis::X => Vector::new(1., 0., 0.),
            Axis::Y => Vector::new(0., 1., 0.),
            Axis::Z => Vector::new(0., 0., 1.),
        }
    }
}

/// Calculates the rotation matrix for a unit vector `u` and angle `phi` (radians).
///
/// Uses the Rodrigues rotation formula, which is numerically more stable than
/// composing the basic axis matrices:
/// https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula
pub fn rotation_matrix(u: &Vector, phi: f64) -> nd::Array2<f64> {
    if !u.length().is_close(1.) {
        panic!("rotation_matrix() requires u to be a unit vector");
    }

    let w: nd::Array2<f64> = nd::arr2(&[[0., -u.dz, u.dy], [u.dz, 0., -u.dx], [-u.dy, u.dx, 0.]]);

    nd::Array::eye(3) + phi.sin() * &w + (2. * (phi / 2.).sin().powi(2)) * w.dot(&w)
}

/// Rotates points using the rotation matrix `rot`.
pub fn rotate_points(pts: &[Point], rot: &nd::ArrayView2<f64>) -> Vec<Point> {
    let pts = points_to_array(pts);
    let pts = pts.dot(rot);

    array_to_points(pts)
}

/// Rotates points around the unit vector `u` by the angle `phi` (radians).
///
/// The rotation axis passes through the origin. Points with zero-length `u`
/// or zero angle are returned unchanged.
pub fn rotate_points_around_vector(pts: &[Point], u: &Vector, phi: f64) -> Vec<Point> {
    if u.length().is_close(0.) || phi.abs().is_close(0.) {
        // No need to rotate
        return pts.to_vec();
    }
    let rot = rotation_matrix(u, phi);

    rotate_points(pts, &rot.t())
}

/// Rotates points around one of the world axes by `degrees`.
///
/// This is the entry point used by the placement pipeline, which expresses
/// rotations as ordered `(axis, degrees)` steps.
pub fn rotate_points_about_axis(pts: &[Point], axis: Axis, degrees: f64) -> Vec<Point> {
    rotate_points_around_vector(pts, &axis.unit_vector(), degrees.to_radians())
}
