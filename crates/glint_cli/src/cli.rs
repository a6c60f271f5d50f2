//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::{Preset, RenderConfig};
use log::LevelFilter;

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable with `--preset`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Showcase,
    Random,
    Torus,
    SingleSphere,
}

impl From<PresetArg> for Preset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Showcase => Preset::Showcase,
            PresetArg::Random => Preset::Random,
            PresetArg::Torus => Preset::Torus,
            PresetArg::SingleSphere => Preset::SingleSphere,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "A CPU path tracer with Blinn highlights and soft shadows")]
pub struct Args {
    /// JSON scene description to render
    #[arg(long, conflicts_with = "preset")]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no --scene is given
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Deepest bounce that is still traced
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for sampling and for the random preset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Bucket edge length in pixels
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Render on the calling thread without buckets
    #[arg(long)]
    pub single_threaded: bool,

    /// Output path; `-` writes PPM to stdout, `.ppm` writes PPM, other
    /// extensions are encoded by format
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Logging level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Layer command line values over `config`.
    pub fn apply_overrides(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(bucket_size) = self.bucket_size {
            config.bucket_size = bucket_size;
        }
        config
    }
}
