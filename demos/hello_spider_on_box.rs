//! Draws a single spider-on-a-box unit cell at the origin.
//!
//! To run:
//!     cargo run --example hello_spider_on_box

use anyhow::Result;
use std::path::Path;
use xkcd_red_spider::io::ply::read_ply;
use xkcd_red_spider::transform::Placement;
use xkcd_red_spider::{DrawConfig, Scene, SpiderUnit, draw_scene};

fn main() -> Result<()> {
    let raw_spider = read_ply(Path::new("data/spider.ply"))?;
    let unit = SpiderUnit::assemble("unit", &raw_spider, &Placement::identity());

    let scene = Scene::from_units(vec![unit]);
    draw_scene(&scene, &DrawConfig::default())?;
    Ok(())
}
