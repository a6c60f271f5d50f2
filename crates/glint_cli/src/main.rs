mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{load_scene, output, render, render_buckets, Preset, RenderConfig, Scene};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(LevelFilter::from(args.log_level))
        .parse_default_env()
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let scene = assemble_scene(&args)?;
    let base = scene.render.clone().unwrap_or_default();
    let config = args.apply_overrides(base).sanitized();
    let camera = scene.build_camera(&config);

    let image = if args.single_threaded {
        info!(
            "Rendering {}x{} at {} spp on one thread",
            config.width, config.height, config.samples_per_pixel
        );
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let image = render(&camera, &scene.world, &scene.light, &config, &mut rng);
        info!("Render finished in {:.2?}", start.elapsed());
        image
    } else {
        render_buckets(&camera, &scene.world, &scene.light, &config)
    };

    output::save(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

/// Scene from `--scene`, else the chosen preset, else the showcase.
fn assemble_scene(args: &Args) -> Result<Scene> {
    if let Some(path) = &args.scene {
        info!("Loading scene {}", path.display());
        return load_scene(path).with_context(|| format!("Failed to load {}", path.display()));
    }

    let preset = args.preset.map_or(Preset::Showcase, Preset::from);
    let seed = args.seed.unwrap_or(RenderConfig::default().seed);
    info!("Using preset {:?}", preset);
    Ok(preset.build(seed))
}
