use anyhow::Result;
use std::path::Path;
use xkcd_red_spider::{DrawConfig, Scene, draw_scene};

fn main() -> Result<()> {
    let scene = Scene::xkcd(Path::new("data"))?;
    draw_scene(&scene, &DrawConfig::default())?;
    Ok(())
}
