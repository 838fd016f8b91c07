//! The army layout: which grid cell gets a spider unit and how it is turned.

use crate::Mesh;
use crate::Vector;
use crate::geom::rotation::Axis;
use crate::scene::unit::SpiderUnit;
use crate::transform::{Placement, RotationStep};
use serde::{Deserialize, Serialize};

/// One army unit on the 2D integer grid.
///
/// The translation of the unit is the grid coordinate padded with z = 0.
/// `rotation` is `None` for an upright spider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridUnit {
    pub coord: (i64, i64),
    pub rotation: Option<Vec<RotationStep>>,
}

impl GridUnit {
    pub fn new(coord: (i64, i64), rotation: Option<Vec<RotationStep>>) -> Self {
        Self { coord, rotation }
    }

    /// Derives the unit placement from the grid coordinate and rotation.
    pub fn placement(&self) -> Placement {
        Placement::identity()
            .with_rotation(self.rotation.clone().unwrap_or_default())
            .with_translation(Vector::new(self.coord.0 as f64, self.coord.1 as f64, 0.))
    }
}

/// A full army layout: grid units plus extra units appended for fidelity
/// with the comic (two spiders sharing a cell with another unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmyLayout {
    pub grid: Vec<GridUnit>,
    pub extra: Vec<GridUnit>,
}

impl ArmyLayout {
    /// The comic-accurate layout.
    pub fn xkcd() -> Self {
        use Axis::{X, Y, Z};
        let step = RotationStep::new;

        let grid = vec![
            GridUnit::new((1, 0), None),
            GridUnit::new((0, 3), Some(vec![step(Z, -90.), step(Y, 180.)])),
            GridUnit::new((-1, -2), Some(vec![step(Z, 0.), step(Y, 180.)])),
            GridUnit::new((3, -2), Some(vec![step(Z, 0.), step(Y, 180.)])),
            GridUnit::new((4, 0), Some(vec![step(Z, 180.), step(Y, -90.)])),
            GridUnit::new((6, -1), Some(vec![step(Z, 90.)])),
            GridUnit::new((8, 1), None),
            GridUnit::new((10, -1), Some(vec![step(Y, -90.)])),
            GridUnit::new((-2, 2), Some(vec![step(Z, -90.)])),
            GridUnit::new((-4, 2), Some(vec![step(Y, 90.)])),
            GridUnit::new((-6, -1), Some(vec![step(Y, 180.)])),
            GridUnit::new((-8, 2), Some(vec![step(X, -90.)])),
            GridUnit::new((-7, -2), Some(vec![step(Y, 90.)])),
            GridUnit::new((-10, -3), None),
        ];

        // Two extra spiders sharing cells with grid units above
        let extra = vec![
            GridUnit::new((-1, -2), Some(vec![step(X, 90.)])),
            GridUnit::new((-4, 2), Some(vec![step(Z, 180.)])),
        ];

        Self { grid, extra }
    }
}

/// Assembles one spider unit per layout entry, each from fresh meshes.
pub fn build_army(layout: &ArmyLayout, raw_spider: &Mesh) -> Vec<SpiderUnit> {
    let mut army: Vec<SpiderUnit> = Vec::with_capacity(layout.grid.len() + layout.extra.len());

    for (i, unit) in layout.grid.iter().enumerate() {
        let name = format!("unit_{:02}", i);
        army.push(SpiderUnit::assemble(&name, raw_spider, &unit.placement()));
    }
    for (i, unit) in layout.extra.iter().enumerate() {
        let name = format!("extra_{}", i);
        army.push(SpiderUnit::assemble(&name, raw_spider, &unit.placement()));
    }

    army
}
