//! Deterministic world simulation
//!
//! All placement logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Fixed update order (mousehole, layer A, layer B, slots in index order)
//! - No rendering or platform dependencies

pub mod arbiter;
pub mod background;
pub mod camera;
pub mod decoration;
pub mod recycle;
pub mod runner;
pub mod state;
pub mod tick;

pub use arbiter::{arbitrate, overlaps};
pub use background::BackgroundTile;
pub use camera::{Camera, Viewport};
pub use decoration::{Decoration, Layer, LayerId, LayerSnapshot, SlotId, SpawnWindow};
pub use recycle::{is_offscreen, recycle};
pub use runner::Runner;
pub use state::{Frame, RecycleEvent, SpriteFrame, WorldState, WorldStats};
pub use tick::{step_world, tick};
