//! 2D painter abstraction
//!
//! The particle field draws through [`Painter`]; the browser implementation
//! wraps a Canvas 2D context, [`RecordingPainter`] keeps the draw calls for
//! headless runs and tests.

pub mod color;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

pub use color::Rgba;
pub use recording::{DrawCall, RecordingPainter};

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasPainter;

use glam::Vec2;

/// Minimal immediate-mode 2D drawing surface
pub trait Painter {
    /// Clear the whole `width` x `height` area
    fn clear(&mut self, width: f32, height: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}
