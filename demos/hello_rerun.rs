//! Logs the full scene to a Rerun viewer instead of opening a render window.
//!
//! To run (spawns the viewer, or connects to one already listening):
//!     cargo run --example hello_rerun

use anyhow::Result;
use std::path::Path;
use xkcd_red_spider::draw::rerun::{log_scene, start_session};
use xkcd_red_spider::{DrawConfig, Scene};

fn main() -> Result<()> {
    let scene = Scene::xkcd(Path::new("data"))?;

    let config = DrawConfig::default();
    let session = start_session(&config)?;
    log_scene(&session, &scene, &config)?;
    Ok(())
}
