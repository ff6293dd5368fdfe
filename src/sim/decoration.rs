//! Decoration pool: fixed slots grouped into layers
//!
//! Every decoration is allocated once at world start and lives forever.
//! Recycling mutates a slot in place; nothing is ever pushed or removed.

use glam::DVec2;
use serde::Serialize;

use crate::config::{DecorationSpec, LayerSpec};
use crate::consts::MAX_LAYER_SLOTS;

/// The two paired layers. Each is the other's overlap partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayerId {
    A,
    B,
}

impl LayerId {
    pub const ALL: [LayerId; 2] = [LayerId::A, LayerId::B];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            LayerId::A => 0,
            LayerId::B => 1,
        }
    }

    /// The sibling layer checked by the arbiter
    #[inline]
    pub fn other(self) -> LayerId {
        match self {
            LayerId::A => LayerId::B,
            LayerId::B => LayerId::A,
        }
    }
}

/// Address of a decoration in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SlotId {
    /// The lone decoration with no overlap partner
    Mousehole,
    Layer { layer: LayerId, slot: usize },
}

/// Respawn window relative to the viewport's right edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnWindow {
    /// Minimum distance past the right edge
    pub lead: f64,
    /// Width of the window beyond `lead`
    pub spread: f64,
}

impl SpawnWindow {
    pub fn new(lead: f64, spread: f64) -> Self {
        Self { lead, spread }
    }

    /// Inclusive `(min, max)` x for a respawn given the current right edge
    #[inline]
    pub fn bounds(&self, right_edge: f64) -> (f64, f64) {
        let min = right_edge + self.lead;
        (min, min + self.spread)
    }
}

/// A recyclable decoration sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub name: String,
    /// World position; `y` never changes after creation
    pub pos: DVec2,
    /// Visual width, used for overlap tests
    pub width: f64,
    /// Distance past the left edge before the sprite counts as gone
    pub clearance: f64,
    pub window: SpawnWindow,
    pub visible: bool,
    /// Number of times this slot has been recycled
    pub recycles: u32,
}

impl Decoration {
    pub fn new(name: &str, pos: DVec2, width: f64, clearance: f64, window: SpawnWindow) -> Self {
        Self {
            name: name.to_string(),
            pos,
            width,
            clearance,
            window,
            visible: true,
            recycles: 0,
        }
    }

    /// Build from config with an already-drawn starting x
    pub fn from_spec(spec: &DecorationSpec, x: f64, window: SpawnWindow) -> Self {
        Self::new(
            &spec.name,
            DVec2::new(x, spec.y),
            spec.width,
            spec.effective_clearance(),
            window,
        )
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }
}

/// Current x of every slot in a layer, copied out before recycling starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSnapshot {
    xs: [f64; MAX_LAYER_SLOTS],
    len: usize,
}

impl LayerSnapshot {
    pub fn as_slice(&self) -> &[f64] {
        &self.xs[..self.len]
    }
}

/// A named group of 1 or 2 decorations
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub slots: Vec<Decoration>,
}

impl Layer {
    /// Create a layer from a validated spec; `place` draws the starting x for each slot
    pub fn from_spec(
        spec: &LayerSpec,
        spread: f64,
        mut place: impl FnMut(&DecorationSpec) -> f64,
    ) -> Self {
        let slots = spec
            .decorations
            .iter()
            .map(|d| {
                let window = SpawnWindow::new(d.effective_clearance(), spread);
                Decoration::from_spec(d, place(d), window)
            })
            .collect();
        Self {
            name: spec.name.clone(),
            slots,
        }
    }

    pub fn snapshot(&self) -> LayerSnapshot {
        let mut xs = [0.0; MAX_LAYER_SLOTS];
        for (dst, d) in xs.iter_mut().zip(&self.slots) {
            *dst = d.x();
        }
        LayerSnapshot {
            xs,
            len: self.slots.len().min(MAX_LAYER_SLOTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Role;

    #[test]
    fn test_layer_id_symmetry() {
        for id in LayerId::ALL {
            assert_ne!(id, id.other());
            assert_eq!(id, id.other().other());
        }
        assert_eq!(LayerId::A.index(), 0);
        assert_eq!(LayerId::B.index(), 1);
    }

    #[test]
    fn test_spawn_window_bounds() {
        let window = SpawnWindow::new(80.0, 800.0);
        assert_eq!(window.bounds(800.0), (880.0, 1680.0));
    }

    #[test]
    fn test_layer_from_spec_uses_role_clearance() {
        let spec = LayerSpec {
            name: "window".into(),
            decorations: vec![
                DecorationSpec::new("w1", 40.0, 200.0, (900.0, 1300.0), Role::Primary),
                DecorationSpec::new("w2", 40.0, 200.0, (1600.0, 2000.0), Role::Secondary),
            ],
        };
        let layer = Layer::from_spec(&spec, 800.0, |d| d.spawn_min);

        assert_eq!(layer.slots.len(), 2);
        assert_eq!(layer.slots[0].clearance, 80.0);
        assert_eq!(layer.slots[0].window, SpawnWindow::new(80.0, 800.0));
        assert_eq!(layer.slots[1].clearance, 40.0);
        assert_eq!(layer.slots[1].pos, DVec2::new(1600.0, 200.0));
        assert!(layer.slots.iter().all(|d| d.visible));
    }

    #[test]
    fn test_snapshot_single_slot() {
        let spec = LayerSpec {
            name: "bookcase".into(),
            decorations: vec![DecorationSpec::new(
                "b1",
                60.0,
                580.0,
                (2200.0, 2700.0),
                Role::Primary,
            )],
        };
        let layer = Layer::from_spec(&spec, 800.0, |_| 2500.0);
        assert_eq!(layer.snapshot().as_slice(), &[2500.0]);
    }
}
