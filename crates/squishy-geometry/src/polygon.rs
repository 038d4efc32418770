//! Planar polygon primitives.
//!
//! The 2D convention is right-handed: a positive signed area means the
//! vertices run counter-clockwise.

use squishy_math::Vec2;

/// Returns true only if `p` lies strictly inside triangle `(p1, p2, p3)`.
///
/// Points on an edge or a corner (any barycentric coordinate exactly 0 or 1)
/// are reported outside. Ear clipping depends on this so that a collinear
/// polygon vertex lying on a candidate ear's edge does not block the clip.
/// Degenerate triangles contain nothing.
pub fn point_in_triangle(p1: Vec2, p2: Vec2, p3: Vec2, p: Vec2) -> bool {
    let denominator = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    if denominator == 0.0 {
        return false;
    }

    let a = ((p2.y - p3.y) * (p.x - p3.x) + (p3.x - p2.x) * (p.y - p3.y)) / denominator;
    let b = ((p3.y - p1.y) * (p.x - p3.x) + (p1.x - p3.x) * (p.y - p3.y)) / denominator;
    let c = 1.0 - a - b;

    a > 0.0 && a < 1.0 && b > 0.0 && b < 1.0 && c > 0.0 && c < 1.0
}

/// Shoelace area of a closed polygon. The sign gives the winding.
pub fn signed_area(polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0f32;
    let mut prev = polygon[n - 1];
    for &cur in polygon {
        twice_area += prev.x * cur.y - cur.x * prev.y;
        prev = cur;
    }
    twice_area * 0.5
}

/// Unsigned area of a triangle.
#[inline]
pub fn triangle_area(tri: [Vec2; 3]) -> f32 {
    0.5 * (tri[1] - tri[0]).perp_dot(tri[2] - tri[0]).abs()
}
