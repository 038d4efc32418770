//! Direction helpers.

use glam::Vec3;

/// Splits `v` into a unit direction and its length.
///
/// Returns `None` when the length is below `min_length`, so callers never
/// divide by a vanishing length.
#[inline]
pub fn direction_and_length(v: Vec3, min_length: f32) -> Option<(Vec3, f32)> {
    let len = v.length();
    if !(len > min_length) || !len.is_finite() {
        return None;
    }
    Some((v / len, len))
}
