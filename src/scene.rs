//! Assembly of the xkcd red-spider scene.
//!
//! A scene is an army of spider-on-a-box units plus an optional city of
//! buildings below them. Each part is built from freshly constructed meshes,
//! so repeated assembly never accumulates transforms.

pub mod army;
pub mod buildings;
pub mod layout;
pub mod unit;

use crate::Mesh;
use crate::Point;
use crate::Vector;
use crate::geom::point::bounding_box;
use crate::io::ply::read_ply;
use crate::scene::army::{ArmyLayout, build_army};
use crate::scene::buildings::load_buildings;
use crate::scene::unit::SpiderUnit;
use anyhow::Result;
use std::path::Path;

/// Relative location of the spider model (PLY) inside the data directory.
pub const SPIDER_ASSET: &str = "spider.ply";

/// Relative location of the buildings model (OBJ) inside the data directory.
pub const BUILDINGS_ASSET: &str = "buildings-and-skyscrapers/source/buildings.obj";

/// How far below the army the city sits.
const BUILDINGS_DROP: f64 = -10.;

pub struct Scene {
    pub army: Vec<SpiderUnit>,
    pub buildings: Option<Mesh>,
}

impl Scene {
    /// Builds the comic-accurate scene from assets in `data_dir`.
    ///
    /// Reads the spider from [`SPIDER_ASSET`] and the buildings from
    /// [`BUILDINGS_ASSET`]. Missing or malformed assets propagate as errors;
    /// nothing is retried or recovered.
    pub fn xkcd(data_dir: &Path) -> Result<Self> {
        let raw_spider = read_ply(&data_dir.join(SPIDER_ASSET))?;
        let army = build_army(&ArmyLayout::xkcd(), &raw_spider);

        let mut buildings = load_buildings(&data_dir.join(BUILDINGS_ASSET))?;
        buildings.translate(Vector::new(0., 0., BUILDINGS_DROP));

        Ok(Self {
            army,
            buildings: Some(buildings),
        })
    }

    /// Builds a scene holding only an army, without buildings.
    pub fn army_only(layout: &ArmyLayout, raw_spider: &Mesh) -> Self {
        Self {
            army: build_army(layout, raw_spider),
            buildings: None,
        }
    }

    /// Builds a scene from already assembled units.
    pub fn from_units(units: Vec<SpiderUnit>) -> Self {
        Self {
            army: units,
            buildings: None,
        }
    }

    /// Returns the bounding box over every mesh in the scene.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut pts: Vec<Point> = Vec::new();
        for unit in &self.army {
            pts.extend_from_slice(unit.spider.vertices());
            pts.extend_from_slice(unit.box_mesh.vertices());
        }
        if let Some(buildings) = &self.buildings {
            pts.extend_from_slice(buildings.vertices());
        }
        bounding_box(&pts)
    }
}
