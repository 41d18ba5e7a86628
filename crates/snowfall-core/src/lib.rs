//! Snowfall Core - Foundational types for the snowfall effect
//!
//! This crate provides the types that all other snowfall crates depend on:
//! - `Color` - 8-bit RGBA paint color
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, SnowfallError};
pub use types::Color;
