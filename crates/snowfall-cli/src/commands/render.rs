//! Headless snowfall-to-PNG render command

use anyhow::{Context, Result};
use snowfall_core::Color;
use snowfall_particles::{Snowfall, SnowfallConfig};
use snowfall_render::Canvas;
use snowfall_runtime::FrameLoop;
use std::fs;
use std::path::PathBuf;

pub struct RenderArgs {
    pub config: Option<PathBuf>,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    pub sequence: Option<PathBuf>,
    pub seed: Option<u64>,
    pub count: Option<u32>,
    pub background: [u8; 3],
    pub transparent: bool,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let config = SnowfallConfig::load(args.config.as_deref())
        .context("Failed to load snowfall config")?;
    render(config, &args)
}

/// Simulate `config` headlessly and write the frames `args` asks for
pub fn render(mut config: SnowfallConfig, args: &RenderArgs) -> Result<()> {
    if let Some(count) = args.count {
        config.snowflakes_num = count;
    }

    let view = Snowfall::from_config(config, args.seed).context("Failed to create snowfall view")?;

    let background = if args.transparent {
        Color::TRANSPARENT
    } else {
        Color::from(args.background)
    };
    let canvas = Canvas::new(args.width, args.height, background);
    let mut frame_loop = FrameLoop::new(view, canvas);

    log::info!(
        "Rendering {} snowflakes on {}x{} for {} frames",
        frame_loop.view().len(),
        args.width,
        args.height,
        args.frames
    );

    if let Some(dir) = &args.sequence {
        fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))?;
        for _ in 0..args.frames {
            if !frame_loop.frame() {
                continue;
            }
            let path = dir.join(format!("frame_{:05}.png", frame_loop.frames_drawn()));
            frame_loop
                .surface()
                .save_png(&path)
                .context(format!("Failed to save frame to {}", path.display()))?;
        }
        println!(
            "Rendered {} frames ({}x{}) into {}",
            frame_loop.frames_drawn(),
            args.width,
            args.height,
            dir.display()
        );
        return Ok(());
    }

    frame_loop.run(args.frames);
    frame_loop
        .surface()
        .save_png(&args.output)
        .context(format!("Failed to save image to {}", args.output.display()))?;

    println!(
        "Rendered {}x{} frame {} to {}",
        args.width,
        args.height,
        frame_loop.frames_drawn(),
        args.output.display()
    );

    Ok(())
}
