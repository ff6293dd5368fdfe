//! Viewport and the camera that follows the runner
//!
//! The camera only scrolls horizontally. It keeps the runner centred, never
//! scrolls past the world's left bound at 0, and never scrolls back left.

use serde::Serialize;

/// The visible window onto the world, read by the decoration controllers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// World x of the left edge
    pub scroll_x: f64,
    pub width: f64,
}

impl Viewport {
    pub fn new(scroll_x: f64, width: f64) -> Self {
        Self { scroll_x, width }
    }

    /// World x of the right edge
    #[inline]
    pub fn right_edge(&self) -> f64 {
        self.scroll_x + self.width
    }
}

/// Horizontal follow camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub viewport: Viewport,
}

impl Camera {
    pub fn new(width: f64) -> Self {
        Self {
            viewport: Viewport::new(0.0, width),
        }
    }

    #[inline]
    pub fn scroll_x(&self) -> f64 {
        self.viewport.scroll_x
    }

    /// Centre on `target_x`, clamped to the left bound and to forward motion
    pub fn follow(&mut self, target_x: f64) {
        let centred = (target_x - self.viewport.width * 0.5).max(0.0);
        self.viewport.scroll_x = self.viewport.scroll_x.max(centred);
    }
}
