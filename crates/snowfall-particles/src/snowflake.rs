//! A single snowflake: reset, update and draw

use crate::randomizer::Randomizer;
use crate::sprite::Sprite;
use crate::surface::Surface;
use snowfall_core::Color;
use std::sync::Arc;

/// Parameters shared by every flake of one particle set.
///
/// Sizes are in device pixels; the canvas bounds are those of the last resize.
#[derive(Debug, Clone)]
pub struct SnowflakeParams {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub image: Option<Arc<Sprite>>,
    pub alpha_min: i32,
    pub alpha_max: i32,
    pub angle_max: i32,
    pub size_min_px: i32,
    pub size_max_px: i32,
    pub speed_min: i32,
    pub speed_max: i32,
    pub fading_enabled: bool,
    pub already_falling: bool,
    pub color: Color,
}

impl SnowflakeParams {
    /// Speed for a flake of `size`, interpolated linearly between the speed bounds.
    /// A degenerate size range yields the minimum speed.
    pub fn speed_for_size(&self, size: i32) -> f64 {
        let size_min = f64::from(self.size_min_px);
        let size_span = f64::from(self.size_max_px) - size_min;
        let speed_min = f64::from(self.speed_min);
        if size_span == 0.0 {
            return speed_min;
        }
        (f64::from(size) - size_min) / size_span * (f64::from(self.speed_max) - speed_min)
            + speed_min
    }
}

pub struct Snowflake {
    params: Arc<SnowflakeParams>,
    randomizer: Randomizer,
    size: i32,
    alpha: i32,
    paint_alpha: u8,
    sprite: Option<Sprite>,
    speed_x: f64,
    speed_y: f64,
    position_x: f64,
    position_y: f64,
}

impl Snowflake {
    pub fn new(params: Arc<SnowflakeParams>, randomizer: Randomizer) -> Self {
        let mut flake = Self {
            params,
            randomizer,
            size: 0,
            alpha: 255,
            paint_alpha: 255,
            sprite: None,
            speed_x: 0.0,
            speed_y: 0.0,
            position_x: 0.0,
            position_y: 0.0,
        };
        flake.reset(None);
        flake
    }

    /// Re-roll size, velocity, alpha and position.
    ///
    /// `position_y` pins the vertical position; without it the flake is placed
    /// anywhere on the canvas, or above it when snow is not already falling.
    pub fn reset(&mut self, position_y: Option<f64>) {
        let params = Arc::clone(&self.params);

        self.size = self
            .randomizer
            .uniform_int(params.size_min_px, params.size_max_px, true);
        self.sprite = params
            .image
            .as_ref()
            .and_then(|image| image.scaled(self.size));

        let speed = params.speed_for_size(self.size);
        let angle = (self.randomizer.uniform_double(params.angle_max)
            * f64::from(self.randomizer.signum()))
        .to_radians();
        self.speed_x = speed * angle.sin();
        self.speed_y = speed * angle.cos();

        self.alpha = self
            .randomizer
            .uniform_int(params.alpha_min, params.alpha_max, false);
        self.paint_alpha = clamp_alpha(f64::from(self.alpha));

        self.position_x = self.randomizer.uniform_double(params.canvas_width);
        self.position_y = match position_y {
            Some(y) => y,
            None => {
                let y = self.randomizer.uniform_double(params.canvas_height);
                if params.already_falling {
                    y
                } else {
                    // the draw can overshoot the height by up to one pixel
                    let height = f64::from(params.canvas_height);
                    y.min(height) - height - f64::from(self.size)
                }
            }
        };
    }

    /// Advance one frame, respawning above the top edge after leaving the bottom
    pub fn update(&mut self) {
        self.position_x += self.speed_x;
        self.position_y += self.speed_y;

        let height = f64::from(self.params.canvas_height);
        if self.position_y > height {
            self.position_y = -f64::from(self.size);
            self.reset(Some(self.position_y));
        }

        if self.params.fading_enabled && self.params.canvas_height > 0 {
            let faded = f64::from(self.alpha) * (height - self.position_y) / height;
            self.paint_alpha = clamp_alpha(faded);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let (x, y) = (self.position_x as f32, self.position_y as f32);
        match &self.sprite {
            Some(sprite) => surface.draw_image(sprite, x, y, self.paint_alpha),
            None => surface.draw_circle(
                x,
                y,
                self.size as f32,
                self.params.color.with_alpha(self.paint_alpha),
            ),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Base alpha rolled at the last reset
    pub fn alpha(&self) -> i32 {
        self.alpha
    }

    /// Alpha used for drawing, after fading
    pub fn paint_alpha(&self) -> u8 {
        self.paint_alpha
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    pub fn speed(&self) -> (f64, f64) {
        (self.speed_x, self.speed_y)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.position_x, self.position_y)
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position_x = x;
        self.position_y = y;
    }
}

fn clamp_alpha(alpha: f64) -> u8 {
    alpha.clamp(0.0, 255.0) as u8
}
