//! World state and the per-frame output handed to rendering

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::background::BackgroundTile;
use super::camera::Camera;
use super::decoration::{Decoration, Layer, LayerId, SlotId, SpawnWindow};
use super::runner::Runner;
use crate::config::{ConfigError, WorldConfig};
use crate::consts::RUNNER_FLOOR_OFFSET;

/// Emitted whenever a slot is recycled during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecycleEvent {
    pub slot: SlotId,
    pub x: f64,
    pub visible: bool,
}

/// Running counters (diagnostics only)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorldStats {
    pub mousehole_recycles: u64,
    pub layer_recycles: [u64; 2],
    /// Recycles that ended hidden by the arbiter
    pub hidden: u64,
}

impl WorldStats {
    pub fn total_recycles(&self) -> u64 {
        self.mousehole_recycles + self.layer_recycles.iter().sum::<u64>()
    }
}

/// One decoration as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteFrame {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub scroll_x: f64,
    pub background_offset: f64,
    /// Backdrop offset reduced into one texture repeat
    pub background_phase: f64,
    pub runner_x: f64,
    pub decorations: Vec<SpriteFrame>,
}

/// Complete world state
///
/// The decoration pool is sized at construction and never grows or shrinks.
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub runner: Runner,
    pub camera: Camera,
    pub background: BackgroundTile,
    /// Lone decoration, recycled but never arbitrated
    pub mousehole: Decoration,
    /// The paired layers, indexed by [`LayerId::index`]
    pub layers: [Layer; 2],
    /// Recycles from the most recent tick
    pub events: Vec<RecycleEvent>,
    pub stats: WorldStats,
}

impl WorldState {
    /// Validate the config and build the world from it
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let runner = Runner::new(
            config.runner_start_x,
            config.viewport_height - RUNNER_FLOOR_OFFSET,
            config.runner_speed,
        );
        let mut camera = Camera::new(config.viewport_width);
        camera.follow(runner.pos.x);

        let mut background = BackgroundTile::new(config.background_tile_width);
        background.sync(camera.scroll_x());

        let mousehole = Decoration::from_spec(
            &config.mousehole,
            rng.random_range(config.mousehole.spawn_min..=config.mousehole.spawn_max),
            SpawnWindow::new(config.mousehole_recycle_lead, config.mousehole_recycle_spread),
        );

        let [spec_a, spec_b] = &config.layers;
        let layer_a = Layer::from_spec(spec_a, config.recycle_spread, |d| {
            rng.random_range(d.spawn_min..=d.spawn_max)
        });
        let layer_b = Layer::from_spec(spec_b, config.recycle_spread, |d| {
            rng.random_range(d.spawn_min..=d.spawn_max)
        });

        log::info!(
            "World created with seed {}: {} + {} + 1 decorations",
            config.seed,
            layer_a.slots.len(),
            layer_b.slots.len()
        );

        Ok(Self {
            seed: config.seed,
            rng,
            time_ticks: 0,
            runner,
            camera,
            background,
            mousehole,
            layers: [layer_a, layer_b],
            events: Vec::new(),
            stats: WorldStats::default(),
        })
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.index()]
    }

    pub fn decoration(&self, slot: SlotId) -> Option<&Decoration> {
        match slot {
            SlotId::Mousehole => Some(&self.mousehole),
            SlotId::Layer { layer, slot } => self.layer(layer).slots.get(slot),
        }
    }

    /// All decorations in update order
    pub fn decorations(&self) -> impl Iterator<Item = &Decoration> {
        std::iter::once(&self.mousehole).chain(self.layers.iter().flat_map(|l| l.slots.iter()))
    }

    pub fn decoration_count(&self) -> usize {
        1 + self.layers.iter().map(|l| l.slots.len()).sum::<usize>()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.time_ticks,
            scroll_x: self.camera.scroll_x(),
            background_offset: self.background.tile_offset,
            background_phase: self.background.wrapped_offset(),
            runner_x: self.runner.pos.x,
            decorations: self
                .decorations()
                .map(|d| SpriteFrame {
                    name: d.name.clone(),
                    x: d.pos.x,
                    y: d.pos.y,
                    visible: d.visible,
                })
                .collect(),
        }
    }
}
