//! Off-screen detection and respawn placement
//!
//! A decoration is recycled once it has travelled its clearance past the left
//! edge of the viewport. It is moved to a random x inside its spawn window,
//! which always starts ahead of the right edge, so the jump is never visible.

use rand::Rng;

use super::camera::Viewport;
use super::decoration::Decoration;

/// True once the decoration is fully behind the camera
#[inline]
pub fn is_offscreen(decoration: &Decoration, viewport: &Viewport) -> bool {
    decoration.pos.x + decoration.clearance < viewport.scroll_x
}

/// Move the decoration ahead of the viewport if it has scrolled off.
///
/// Returns true if it was moved. Visibility is left alone; the arbiter owns it.
pub fn recycle<R: Rng>(
    decoration: &mut Decoration,
    viewport: &Viewport,
    rng: &mut R,
) -> bool {
    if !is_offscreen(decoration, viewport) {
        return false;
    }

    let (min, max) = decoration.window.bounds(viewport.right_edge());
    debug_assert!(min <= max, "spawn window for {} is inverted", decoration.name);
    decoration.pos.x = rng.random_range(min..=max);
    decoration.recycles += 1;

    log::debug!(
        "Recycled {} to x={:.1} (window {:.1}..={:.1})",
        decoration.name,
        decoration.pos.x,
        min,
        max
    );
    true
}
