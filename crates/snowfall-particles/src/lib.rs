//! Snowfall Particles - falling-snow overlay simulation
//!
//! Provides a fixed-count set of independently simulated snowflakes:
//! - per-flake random sampler with a clamped Gaussian size bias
//! - size-dependent fall speed with a small random deflection
//! - wrap-around respawn above the top edge and optional depth fading
//! - drawing through a host `Surface`, scheduling through a host `FrameScheduler`

pub mod config;
pub mod randomizer;
pub mod snowfall;
pub mod snowflake;
pub mod sprite;
pub mod surface;

pub use config::SnowfallConfig;
pub use randomizer::Randomizer;
pub use snowfall::{Snowfall, Visibility};
pub use snowflake::{Snowflake, SnowflakeParams};
pub use sprite::Sprite;
pub use surface::{FrameScheduler, FrameTask, Surface};
