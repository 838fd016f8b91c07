//! Placement of a spider-on-a-box unit cell in world space.
//!
//! A placement is a scale factor, an ordered list of axis rotations and a
//! translation. The operations apply in that fixed order; the rotations act
//! on the spider only, so the spider can crawl on any face of its box.

use crate::Mesh;
use crate::Vector;
use crate::geom::rotation::Axis;
use serde::{Deserialize, Serialize};

/// One rotation step: `degrees` around the world `axis` through the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationStep {
    pub axis: Axis,
    pub degrees: f64,
}

impl RotationStep {
    pub fn new(axis: Axis, degrees: f64) -> Self {
        Self { axis, degrees }
    }
}

/// Scale, rotation sequence and translation positioning a unit in the scene.
///
/// Rotation steps apply in list order and do not commute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub scale: f64,
    pub rotation: Vec<RotationStep>,
    pub translation: Option<Vector>,
}

impl Placement {
    /// Identity placement: scale 1, no rotation, no translation.
    pub fn identity() -> Self {
        Self {
            scale: 1.,
            rotation: Vec::new(),
            translation: None,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec<RotationStep>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_translation(mut self, translation: Vector) -> Self {
        self.translation = Some(translation);
        self
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// Applies `placement` to a spider-box unit cell, mutating both meshes.
///
/// The order is fixed:
/// 1. both meshes are scaled by `placement.scale`;
/// 2. each rotation step is applied to the spider only, in list order;
/// 3. both meshes are translated.
pub fn place_spider_box_unit(spider: &mut Mesh, box_mesh: &mut Mesh, placement: &Placement) {
    spider.scale(placement.scale);
    box_mesh.scale(placement.scale);

    for step in &placement.rotation {
        spider.rotate(step.axis, step.degrees);
    }

    if let Some(translation) = placement.translation {
        spider.translate(translation);
        box_mesh.translate(translation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use crate::geom::rotation::rotate_points_about_axis;

    fn spider_stub() -> Mesh {
        Mesh::new(
            vec![
                Point::new(0.1, -0.2, 0.4),
                Point::new(-0.3, 0.3, 0.5),
                Point::new(0., 0., 0.45),
            ],
            None,
        )
    }

    #[test]
    fn test_pipeline_matches_direct_computation() {
        // For every point: (p * s) rotated per the steps, then + t
        let placement = Placement::identity()
            .with_scale(1.6)
            .with_rotation(vec![
                RotationStep::new(Axis::Z, -90.),
                RotationStep::new(Axis::Y, 180.),
            ])
            .with_translation(Vector::new(4., 0., 0.));

        let mut spider = spider_stub();
        let mut box_mesh = Mesh::unit_box();
        let original = spider.clone();
        place_spider_box_unit(&mut spider, &mut box_mesh, &placement);

        let mut expected: Vec<Point> = original
            .vertices
            .iter()
            .map(|p| p.scale(placement.scale))
            .collect();
        for step in &placement.rotation {
            expected = rotate_points_about_axis(&expected, step.axis, step.degrees);
        }
        let t = placement.translation.unwrap();
        for (got, exp) in spider.vertices.iter().zip(expected.iter()) {
            assert!(got.is_close(&(*exp + t)));
        }
    }

    #[test]
    fn test_rotation_applies_to_spider_only() {
        let placement =
            Placement::identity().with_rotation(vec![RotationStep::new(Axis::X, 90.)]);

        let mut spider = spider_stub();
        let mut box_mesh = Mesh::unit_box();
        let box_before = box_mesh.clone();
        place_spider_box_unit(&mut spider, &mut box_mesh, &placement);

        // Box untouched (scale 1, no translation), spider rotated
        for (got, exp) in box_mesh.vertices.iter().zip(box_before.vertices.iter()) {
            assert!(got.is_close(exp));
        }
        assert!(spider.vertices[0].is_close(&Point::new(0.1, -0.4, -0.2)));
    }

    #[test]
    fn test_translation_moves_both() {
        let placement = Placement::identity().with_translation(Vector::new(1., -2., 0.));

        let mut spider = spider_stub();
        let mut box_mesh = Mesh::unit_box();
        place_spider_box_unit(&mut spider, &mut box_mesh, &placement);

        let (pmin, pmax) = box_mesh.bounds().unwrap();
        assert!(pmin.is_close(&Point::new(0.5, -2.5, -0.5)));
        assert!(pmax.is_close(&Point::new(1.5, -1.5, 0.5)));
        assert!(spider.vertices[2].is_close(&Point::new(1., -2., 0.45)));
    }

    #[test]
    fn test_identity_is_noop() {
        let mut spider = spider_stub();
        let mut box_mesh = Mesh::unit_box();
        let spider_before = spider.clone();
        place_spider_box_unit(&mut spider, &mut box_mesh, &Placement::identity());
        for (got, exp) in spider.vertices.iter().zip(spider_before.vertices.iter()) {
            assert!(got.is_close(exp));
        }
    }
}
