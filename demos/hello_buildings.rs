//! Draws the city of buildings alone.
//!
//! To run:
//!     cargo run --example hello_buildings

use anyhow::Result;
use std::path::Path;
use xkcd_red_spider::Vector;
use xkcd_red_spider::scene::BUILDINGS_ASSET;
use xkcd_red_spider::scene::buildings::load_buildings;
use xkcd_red_spider::{DrawConfig, draw_mesh};

fn main() -> Result<()> {
    let mut buildings = load_buildings(&Path::new("data").join(BUILDINGS_ASSET))?;
    buildings.translate(Vector::new(0., 0., -10.));

    let config = DrawConfig::default();
    draw_mesh(&buildings, config.buildings_color, true)?;
    Ok(())
}
