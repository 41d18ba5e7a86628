//! RGBA canvas with source-over blending

use image::{Rgba, RgbaImage};
use snowfall_core::{Color, Result, SnowfallError};
use snowfall_particles::{Sprite, Surface};
use snowfall_runtime::HostSurface;
use std::path::Path;

pub struct Canvas {
    pixels: RgbaImage,
    background: Color,
}

impl Canvas {
    /// A canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(background.to_array())),
            background,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgba([r, g, b, a]) = *self.pixels.get_pixel(x, y);
        Color::new(r, g, b, a)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| {
                SnowfallError::ImageError(format!("Failed to write {}: {}", path.display(), e))
            })
    }

    /// Blend `color` into one pixel, scaling its alpha by `coverage` in [0, 1].
    /// Coordinates outside the canvas are ignored.
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        let (width, height) = (i64::from(self.pixels.width()), i64::from(self.pixels.height()));
        if x < 0 || y < 0 || x >= width || y >= height {
            return;
        }
        let src_a = f32::from(color.a) / 255.0 * coverage;
        if src_a <= 0.0 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        let dst_a = f32::from(dst.0[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let channel = |s: u8, d: u8| {
            let c = (f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        *dst = Rgba([
            channel(color.r, dst.0[0]),
            channel(color.g, dst.0[1]),
            channel(color.b, dst.0[2]),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        if radius <= 0.0 || color.a == 0 {
            return;
        }
        let min_x = (x - radius - 1.0).floor() as i64;
        let max_x = (x + radius + 1.0).ceil() as i64;
        let min_y = (y - radius - 1.0).floor() as i64;
        let max_y = (y + radius + 1.0).ceil() as i64;

        let min_x = min_x.max(0);
        let min_y = min_y.max(0);
        let max_x = max_x.min(i64::from(self.pixels.width()) - 1);
        let max_y = max_y.min(i64::from(self.pixels.height()) - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - x;
                let dy = py as f32 + 0.5 - y;
                // one-pixel anti-aliased rim
                let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage);
                }
            }
        }
    }

    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let left = x.floor() as i64;
        let top = y.floor() as i64;
        let paint = f32::from(alpha) / 255.0;
        for (sx, sy, pixel) in sprite.pixels().enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            if a == 0 {
                continue;
            }
            self.blend(
                left + i64::from(sx),
                top + i64::from(sy),
                Color::new(r, g, b, a),
                paint,
            );
        }
    }
}

impl HostSurface for Canvas {
    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Canvas resized to {}x{}", width, height);
        self.pixels = RgbaImage::from_pixel(width, height, Rgba(self.background.to_array()));
    }

    fn clear(&mut self) {
        let fill = Rgba(self.background.to_array());
        for pixel in self.pixels.pixels_mut() {
            *pixel = fill;
        }
    }
}
