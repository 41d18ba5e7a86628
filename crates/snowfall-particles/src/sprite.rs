//! Snowflake bitmap sprite

use image::imageops::{self, FilterType};
use image::RgbaImage;
use snowfall_core::{Result, SnowfallError};
use std::path::Path;

/// An RGBA bitmap drawn in place of the default circle
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pixels: RgbaImage,
}

impl Sprite {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode a sprite from any format the `image` crate understands
    pub fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|e| {
            SnowfallError::ImageError(format!("Failed to load sprite {}: {}", path.display(), e))
        })?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Square copy of `size`×`size` pixels, nearest-neighbour sampled.
    /// Returns `None` for a non-positive size.
    pub fn scaled(&self, size: i32) -> Option<Sprite> {
        if size <= 0 || self.pixels.width() == 0 || self.pixels.height() == 0 {
            return None;
        }
        let side = size as u32;
        Some(Sprite::new(imageops::resize(
            &self.pixels,
            side,
            side,
            FilterType::Nearest,
        )))
    }
}
