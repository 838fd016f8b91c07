//! Draws the raw spider model alone.
//!
//! To run:
//!     cargo run --example hello_spider

use anyhow::Result;
use std::path::Path;
use xkcd_red_spider::io::ply::read_ply;
use xkcd_red_spider::{DrawConfig, draw_mesh};

fn main() -> Result<()> {
    let spider = read_ply(Path::new("data/spider.ply"))?;
    draw_mesh(&spider, DrawConfig::default().spider_color, false)?;
    Ok(())
}
