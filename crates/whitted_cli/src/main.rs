//! Command-line front end: load a scene, ray trace it, write a PNG.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use whitted_core::load_scene;
use whitted_renderer::{render, Projection, RenderConfig, View};

use cli::{init_logger, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    let scene = load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    let mut view = View::default();
    if args.orthographic {
        view.set_projection(Projection::Orthographic);
    }

    let image = render(&view, &scene, &config);
    image
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("Saved {}", args.output.display());
    Ok(())
}
