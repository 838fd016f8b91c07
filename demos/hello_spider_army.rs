//! Draws a row of four unit cells with growing scale and varying rotation.
//!
//! To run:
//!     cargo run --example hello_spider_army

use anyhow::Result;
use std::path::Path;
use xkcd_red_spider::io::ply::read_ply;
use xkcd_red_spider::transform::{Placement, RotationStep};
use xkcd_red_spider::{Axis, DrawConfig, Scene, SpiderUnit, Vector, draw_scene};

fn main() -> Result<()> {
    let raw_spider = read_ply(Path::new("data/spider.ply"))?;

    let placements = [
        Placement::identity(),
        Placement::identity()
            .with_scale(1.2)
            .with_rotation(vec![RotationStep::new(Axis::Y, 90.)])
            .with_translation(Vector::new(2., 0., 0.)),
        Placement::identity()
            .with_scale(1.4)
            .with_rotation(vec![RotationStep::new(Axis::X, 90.)])
            .with_translation(Vector::new(4., 0., 0.)),
        Placement::identity()
            .with_scale(1.6)
            .with_rotation(vec![RotationStep::new(Axis::Z, 90.)])
            .with_translation(Vector::new(6., 0., 0.)),
    ];

    let units = placements
        .iter()
        .enumerate()
        .map(|(i, p)| SpiderUnit::assemble(&format!("unit_{}", i), &raw_spider, p))
        .collect();

    let scene = Scene::from_units(units);
    draw_scene(&scene, &DrawConfig::default())?;
    Ok(())
}
