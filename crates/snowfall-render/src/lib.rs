//! Snowfall Render - CPU rasterisation of snowfall frames
//!
//! `Canvas` implements the host `Surface` over an `image::RgbaImage`, so the
//! effect can be rendered headlessly and written to PNG.

mod canvas;

pub use canvas::Canvas;
