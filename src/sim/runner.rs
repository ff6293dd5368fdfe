//! The camera target
//!
//! Only horizontal motion matters to the world driver. Jumping, gravity and
//! collision belong to the physics layer and are not modelled here.

use glam::DVec2;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Runner {
    pub pos: DVec2,
    /// Horizontal speed in pixels/s, set from outside
    pub speed: f64,
}

impl Runner {
    pub fn new(x: f64, floor_y: f64, speed: f64) -> Self {
        Self {
            pos: DVec2::new(x, floor_y),
            speed,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.pos.x += self.speed * dt;
    }
}
