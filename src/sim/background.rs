//! Repeating backdrop strip, pinned to the screen and scrolled by texture offset

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundTile {
    /// Texture offset handed to the renderer
    pub tile_offset: f64,
    /// Width of one repeat of the texture
    pub tile_width: f64,
}

impl BackgroundTile {
    pub fn new(tile_width: f64) -> Self {
        Self {
            tile_offset: 0.0,
            tile_width,
        }
    }

    /// Re-anchor to the camera. Assigned, never accumulated, so it cannot drift.
    #[inline]
    pub fn sync(&mut self, scroll_x: f64) {
        self.tile_offset = scroll_x;
    }

    /// Offset reduced into one texture repeat, for renderers that need it small
    pub fn wrapped_offset(&self) -> f64 {
        self.tile_offset.rem_euclid(self.tile_width)
    }
}
