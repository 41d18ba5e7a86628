//! Seams to the host GUI: the drawing surface and the frame scheduler

use crate::snowfall::Snowfall;
use crate::sprite::Sprite;
use snowfall_core::Color;

/// A 2D drawing surface supplied by the host
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill a circle centred on (`x`, `y`). `color.a` is the paint opacity.
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);

    /// Draw `sprite` with its top-left corner at (`x`, `y`), modulated by `alpha`
    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32, alpha: u8);
}

/// Work queued to run against the view before the next repaint
pub type FrameTask = Box<dyn FnOnce(&mut Snowfall)>;

/// The host's frame-scheduling primitive
pub trait FrameScheduler {
    /// Run `task` on the view before the next repaint
    fn post(&mut self, task: FrameTask);

    /// Ask for another repaint on the next display refresh
    fn request_frame(&mut self);
}
