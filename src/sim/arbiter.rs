//! Cross-layer overlap arbitration
//!
//! Run only on a decoration that was just recycled. Compares its new x with
//! the sibling layer and hides it on a clash. The result sticks until the
//! decoration's own next recycle, even if the sibling later moves away.

use super::decoration::Decoration;

/// Overlap test between a freshly placed decoration and one sibling x.
///
/// Deliberately one-sided: only the relocated decoration's width counts.
#[inline]
pub fn overlaps(relocated: &Decoration, other_x: f64) -> bool {
    (relocated.pos.x - other_x).abs() <= relocated.width
}

/// Set visibility from the sibling layer's positions. Returns the new visibility.
pub fn arbitrate(relocated: &mut Decoration, sibling_xs: &[f64]) -> bool {
    let blocker = sibling_xs.iter().find(|&&x| overlaps(relocated, x));
    relocated.visible = blocker.is_none();

    if let Some(x) = blocker {
        log::debug!(
            "Hiding {} at x={:.1}: clashes with sibling at x={:.1}",
            relocated.name,
            relocated.pos.x,
            x
        );
    }
    relocated.visible
}
