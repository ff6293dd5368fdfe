//! World configuration
//!
//! The layout handed to the world at start: viewport, runner tuning, and the
//! decoration pool. Loaded from JSON, validated once, then treated as trusted
//! by the simulation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a [`WorldConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Whether a decoration leads its layer (needs a wider exit clearance) or follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Primary,
    Secondary,
}

impl Role {
    /// Multiplier applied to sprite width to get the default clearance
    pub fn clearance_factor(&self) -> f64 {
        match self {
            Role::Primary => 2.0,
            Role::Secondary => 1.0,
        }
    }
}

/// One decoration sprite in the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationSpec {
    pub name: String,
    /// Sprite width in pixels
    pub width: f64,
    /// Fixed vertical position
    pub y: f64,
    /// Initial x is drawn uniformly from `[spawn_min, spawn_max]`
    pub spawn_min: f64,
    pub spawn_max: f64,
    #[serde(default)]
    pub role: Role,
    /// Explicit exit clearance; falls back to `width * role factor`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance: Option<f64>,
}

impl DecorationSpec {
    pub fn new(name: &str, width: f64, y: f64, spawn: (f64, f64), role: Role) -> Self {
        Self {
            name: name.to_string(),
            width,
            y,
            spawn_min: spawn.0,
            spawn_max: spawn.1,
            role,
            clearance: None,
        }
    }

    /// Distance the sprite must travel past the left edge before it is recycled
    pub fn effective_clearance(&self) -> f64 {
        self.clearance
            .unwrap_or_else(|| self.width * self.role.clearance_factor())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(invalid(format!("{}: width must be positive", self.name)));
        }
        if !self.y.is_finite() {
            return Err(invalid(format!("{}: y must be finite", self.name)));
        }
        if !(self.spawn_min.is_finite() && self.spawn_max.is_finite())
            || self.spawn_min > self.spawn_max
        {
            return Err(invalid(format!(
                "{}: spawn range [{}, {}] is empty",
                self.name, self.spawn_min, self.spawn_max
            )));
        }
        let clearance = self.effective_clearance();
        if !(clearance.is_finite() && clearance > 0.0) {
            return Err(invalid(format!("{}: clearance must be positive", self.name)));
        }
        Ok(())
    }
}

/// A named decoration layer (1 or 2 sprites)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub decorations: Vec<DecorationSpec>,
}

impl LayerSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.decorations.is_empty() || self.decorations.len() > MAX_LAYER_SLOTS {
            return Err(invalid(format!(
                "layer {} must hold 1..={} decorations, has {}",
                self.name,
                MAX_LAYER_SLOTS,
                self.decorations.len()
            )));
        }
        self.decorations.iter().try_for_each(DecorationSpec::validate)
    }
}

/// Complete world layout and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Viewport ===
    pub viewport_width: f64,
    pub viewport_height: f64,

    // === Runner ===
    /// Starting x of the runner (centre of the first screen by default)
    pub runner_start_x: f64,
    /// Horizontal speed in pixels/s
    pub runner_speed: f64,

    // === Backdrop ===
    pub background_tile_width: f64,

    // === Decorations ===
    /// Extra room past the lead of a paired-layer respawn window
    pub recycle_spread: f64,
    /// The lone decoration with no overlap partner
    pub mousehole: DecorationSpec,
    pub mousehole_recycle_lead: f64,
    pub mousehole_recycle_spread: f64,
    /// The two mutually exclusive layers
    pub layers: [LayerSpec; 2],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            runner_start_x: VIEWPORT_WIDTH * 0.5,
            runner_speed: RUNNER_SPEED,

            background_tile_width: BACKGROUND_TILE_WIDTH,

            recycle_spread: RECYCLE_SPREAD,
            mousehole: DecorationSpec::new(
                "mousehole",
                92.0,
                501.0,
                (900.0, 1500.0),
                Role::Secondary,
            ),
            mousehole_recycle_lead: MOUSEHOLE_RECYCLE_LEAD,
            mousehole_recycle_spread: MOUSEHOLE_RECYCLE_SPREAD,
            layers: [
                LayerSpec {
                    name: "window".to_string(),
                    decorations: vec![
                        DecorationSpec::new(
                            "window1",
                            162.0,
                            200.0,
                            (900.0, 1300.0),
                            Role::Primary,
                        ),
                        DecorationSpec::new(
                            "window2",
                            162.0,
                            200.0,
                            (1600.0, 2000.0),
                            Role::Secondary,
                        ),
                    ],
                },
                LayerSpec {
                    name: "bookcase".to_string(),
                    decorations: vec![
                        DecorationSpec::new(
                            "bookcase1",
                            188.0,
                            580.0,
                            (2200.0, 2700.0),
                            Role::Primary,
                        ),
                        DecorationSpec::new(
                            "bookcase2",
                            188.0,
                            580.0,
                            (2900.0, 3400.0),
                            Role::Secondary,
                        ),
                    ],
                },
            ],
        }
    }
}

impl WorldConfig {
    /// Default layout with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject layouts the simulation cannot run (it does not re-check at tick time)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(invalid("viewport_width must be positive".into()));
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            return Err(invalid("viewport_height must be positive".into()));
        }
        if !self.runner_start_x.is_finite() {
            return Err(invalid("runner_start_x must be finite".into()));
        }
        if !(self.runner_speed.is_finite() && self.runner_speed >= 0.0) {
            return Err(invalid("runner_speed must be non-negative".into()));
        }
        if !(self.background_tile_width.is_finite() && self.background_tile_width > 0.0) {
            return Err(invalid("background_tile_width must be positive".into()));
        }
        if !(self.recycle_spread.is_finite() && self.recycle_spread >= 0.0) {
            return Err(invalid("recycle_spread must be non-negative".into()));
        }
        if !(self.mousehole_recycle_lead.is_finite() && self.mousehole_recycle_lead > 0.0) {
            return Err(invalid("mousehole_recycle_lead must be positive".into()));
        }
        if !(self.mousehole_recycle_spread.is_finite() && self.mousehole_recycle_spread >= 0.0) {
            return Err(invalid("mousehole_recycle_spread must be non-negative".into()));
        }
        self.mousehole.validate()?;
        self.layers.iter().try_for_each(LayerSpec::validate)
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}
