//! House Run - an endless side-scrolling runner through a house
//!
//! Core modules:
//! - `sim`: Deterministic world simulation (runner, camera, decoration recycling)
//! - `config`: Data-driven world layout and tuning

pub mod config;
pub mod sim;

pub use config::{ConfigError, DecorationSpec, LayerSpec, Role, WorldConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f64 = 800.0;
    pub const VIEWPORT_HEIGHT: f64 = 640.0;

    /// Runner horizontal speed (pixels/s)
    pub const RUNNER_SPEED: f64 = 200.0;
    /// Runner feet sit this far above the floor
    pub const RUNNER_FLOOR_OFFSET: f64 = 30.0;

    /// Width of one repeat of the backdrop strip
    pub const BACKGROUND_TILE_WIDTH: f64 = 340.0;

    /// Width of the paired-layer respawn window beyond its lead
    pub const RECYCLE_SPREAD: f64 = 800.0;
    /// Mousehole respawn window: lead past the right edge, then spread
    pub const MOUSEHOLE_RECYCLE_LEAD: f64 = 100.0;
    pub const MOUSEHOLE_RECYCLE_SPREAD: f64 = 900.0;

    /// Paired decoration layers never hold more than this many objects
    pub const MAX_LAYER_SLOTS: usize = 2;
}
