//! Snowfall CLI - render the falling-snow overlay headlessly

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, init, render};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snowfall")]
#[command(about = "Falling-snow overlay renderer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default snowfall.toml
    Init {
        /// Where to write the config file
        #[arg(default_value = "snowfall.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved configuration
    Config {
        /// Extra config file layered over global and project config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (toml or json)
        #[arg(long, default_value = "toml", value_parser = ["toml", "json"])]
        format: String,
    },

    /// Simulate the effect and write PNG frames (headless)
    Render {
        /// Extra config file layered over global and project config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output image path for the last frame
        #[arg(short, long, default_value = "snowfall.png")]
        output: PathBuf,

        /// Canvas width in pixels
        #[arg(long, default_value = "1080")]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value = "1920")]
        height: u32,

        /// Number of frames to simulate
        #[arg(long, default_value = "120")]
        frames: u64,

        /// Write every frame into this directory instead of only the last one
        #[arg(long)]
        sequence: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Override the configured snowflake count
        #[arg(long)]
        count: Option<u32>,

        /// Background color (comma-separated r,g,b)
        #[arg(long, value_parser = parse_rgb, default_value = "0,0,0")]
        background: [u8; 3],

        /// Render over a transparent background
        #[arg(long)]
        transparent: bool,
    },
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let channel = |name: &str, part: &str| -> Result<u8, String> {
        part.trim()
            .parse()
            .map_err(|e| format!("invalid {}: {}", name, e))
    };
    Ok([
        channel("r", parts[0])?,
        channel("g", parts[1])?,
        channel("b", parts[2])?,
    ])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Config { config, format } => config::run(config.as_deref(), &format),
        Commands::Render {
            config,
            output,
            width,
            height,
            frames,
            sequence,
            seed,
            count,
            background,
            transparent,
        } => render::run(render::RenderArgs {
            config,
            output,
            width,
            height,
            frames,
            sequence,
            seed,
            count,
            background,
            transparent,
        }),
    }
}
