//! Ear-clipping triangulation.
//!
//! Works on an ordered, non-self-intersecting polygon of either winding.
//! The remaining-vertex ring is walked looking for a convex corner whose
//! triangle holds no other remaining vertex; that corner is emitted and
//! removed. Each successful clip resets an iteration budget of twice the
//! remaining vertex count. Running out of budget means the outline is not
//! simple, and the whole polygon is rejected.

use squishy_math::Vec2;
use squishy_types::constants::EAR_EPSILON;
use squishy_types::{SquishyError, SquishyResult};

use crate::polygon::{point_in_triangle, signed_area};

/// Triangulates `polygon`, returning index triples into the input slice.
///
/// Triangles are counter-clockwise. On failure nothing is returned; callers
/// must not try to salvage a partial triangulation.
pub fn ear_clip_indices(polygon: &[Vec2]) -> SquishyResult<Vec<[usize; 3]>> {
    let n = polygon.len();
    if n < 3 {
        return Err(SquishyError::Triangulation(format!(
            "polygon has {n} vertices, need at least 3"
        )));
    }

    // Work on a counter-clockwise ring of indices.
    let mut ring: Vec<usize> = if signed_area(polygon) > 0.0 {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };

    let mut triangles = Vec::with_capacity(n - 2);
    let mut budget = 2 * ring.len();
    let mut v = ring.len() - 1;

    while ring.len() > 2 {
        if budget == 0 {
            tracing::debug!(
                remaining = ring.len(),
                emitted = triangles.len(),
                "ear clipping ran out of budget"
            );
            return Err(SquishyError::Triangulation(format!(
                "no ear found with {} vertices remaining; polygon is not simple",
                ring.len()
            )));
        }
        budget -= 1;

        let nv = ring.len();
        let u = if v >= nv { 0 } else { v };
        v = if u + 1 >= nv { 0 } else { u + 1 };
        let w = if v + 1 >= nv { 0 } else { v + 1 };

        if is_ear(polygon, &ring, u, v, w) {
            triangles.push([ring[u], ring[v], ring[w]]);
            ring.remove(v);
            budget = 2 * ring.len();
        }
    }

    Ok(triangles)
}

/// Triangulates `polygon`, returning the triangle corners.
pub fn ear_clip(polygon: &[Vec2]) -> SquishyResult<Vec<[Vec2; 3]>> {
    let triangles = ear_clip_indices(polygon)?;
    Ok(triangles
        .into_iter()
        .map(|[a, b, c]| [polygon[a], polygon[b], polygon[c]])
        .collect())
}

/// Is ring corner `v` (between `u` and `w`) a convex ear?
fn is_ear(polygon: &[Vec2], ring: &[usize], u: usize, v: usize, w: usize) -> bool {
    let a = polygon[ring[u]];
    let b = polygon[ring[v]];
    let c = polygon[ring[w]];

    // Reflex and collinear corners are never clipped.
    if (b - a).perp_dot(c - a) <= EAR_EPSILON {
        return false;
    }

    ring.iter()
        .enumerate()
        .filter(|&(i, _)| i != u && i != v && i != w)
        .all(|(_, &p)| !point_in_triangle(a, b, c, polygon[p]))
}
