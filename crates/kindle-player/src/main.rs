//! Kindle Player - windowed demo of the layered renderer
//!
//! Usage:
//!   kindle-player [--config <file>] [--layers N] [--width W] [--height H]
//!                 [--fullscreen] [--resources <dir>]

use anyhow::{Context, Result};
use clap::Parser;
use kindle_player::{AppConfig, CliOverrides, PlayerApp};
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "kindle-player")]
#[command(about = "Kindle player - layered 2D rendering with a pausable game clock")]
struct Args {
    /// Path to config file
    #[arg(long, default_value = "kindle.toml")]
    config: PathBuf,

    /// Number of render layers
    #[arg(long)]
    layers: Option<usize>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Resource directory (contains images/ and sounds/)
    #[arg(long)]
    resources: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = AppConfig::load(&args.config).context("Failed to load config")?;
    config
        .apply_overrides(&CliOverrides {
            layers: args.layers,
            width: args.width,
            height: args.height,
            fullscreen: args.fullscreen,
            resources: args.resources,
        })
        .context("Invalid command-line options")?;

    println!("Controls:");
    println!("  Escape   - Pause / resume");
    println!("  Mouse    - Click the button");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
