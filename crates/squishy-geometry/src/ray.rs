//! Ray/triangle intersection.

use squishy_math::Vec3;

/// Möller–Trumbore intersection of the ray `origin + t·dir` with triangle
/// `(a, b, c)`.
///
/// Returns the ray parameter `t` of the hit, or `None` if the ray is
/// parallel to the triangle plane or misses it. Hits behind the origin are
/// returned with a negative `t`; callers decide whether they count.
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;

    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < f32::EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    Some(edge2.dot(qvec) * inv_det)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_in_front() {
        let t = ray_triangle(
            Vec3::new(0.2, 0.2, -1.0),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        )
        .unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn parallel_ray_misses() {
        let hit = ray_triangle(Vec3::new(0.0, 0.0, 1.0), Vec3::X, Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(hit.is_none());
    }

    #[test]
    fn outside_barycentric_range_misses() {
        let hit = ray_triangle(Vec3::new(2.0, 2.0, -1.0), Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(hit.is_none());
    }
}
