//! The spider-on-a-box unit cell.
//!
//! The unit cell is a box with edge 1 centered at the origin and a spider
//! standing on its top face. Both meshes are constructed fresh each time a
//! unit is assembled; units never share vertex buffers.

use crate::Mesh;
use crate::Vector;
use crate::transform::{Placement, place_spider_box_unit};
use uuid::Uuid;

/// Spider scale relative to the raw model, chosen so the legspan is slightly
/// smaller than the box face.
const SPIDER_SCALE: f64 = 1. / 6.;

/// Offset placing the scaled spider on the top face of the unit box.
const SPIDER_OFFSET: (f64, f64, f64) = (-0.5, -0.5, 0.4);

/// Heading of the spider on its box, in degrees around z.
const SPIDER_HEADING: f64 = -110.;

/// Returns the unit-cell spider derived from the raw spider model.
///
/// The raw model is scaled down, shifted onto the top face of the unit box
/// and turned to the comic's heading, in that order.
pub fn unit_cell_spider(raw_spider: &Mesh) -> Mesh {
    let mut spider = raw_spider.clone();
    spider.scale(SPIDER_SCALE);
    let (dx, dy, dz) = SPIDER_OFFSET;
    spider.translate(Vector::new(dx, dy, dz));
    spider.rotate_z(SPIDER_HEADING);
    spider
}

/// Returns the unit-cell box (edge 1, centered at the origin).
pub fn unit_cell_box() -> Mesh {
    Mesh::unit_box()
}

/// One assembled spider-on-a-box unit, placed in world space.
#[derive(Debug, Clone)]
pub struct SpiderUnit {
    pub name: String,
    pub uid: String,
    pub spider: Mesh,
    pub box_mesh: Mesh,
}

impl SpiderUnit {
    /// Builds a fresh unit cell from the raw spider model and places it.
    pub fn assemble(name: &str, raw_spider: &Mesh, placement: &Placement) -> Self {
        let mut spider = unit_cell_spider(raw_spider);
        let mut box_mesh = unit_cell_box();
        place_spider_box_unit(&mut spider, &mut box_mesh, placement);

        Self {
            name: name.to_string(),
            uid: Uuid::new_v4().to_string(),
            spider,
            box_mesh,
        }
    }
}
