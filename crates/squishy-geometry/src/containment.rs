//! Inside/outside predicates.
//!
//! The lattice builder only needs a yes/no answer for a sample point; how a
//! shape answers it is up to the implementor. Closed triangle soups can use
//! [`parity_contains`], which takes a majority vote of three crossing-number
//! tests along fixed rays.

use squishy_math::Vec3;

use crate::ray::ray_triangle;

/// A static shape that can classify points as inside or outside.
///
/// Implementations must return the same answer for the same point as long
/// as the shape does not change.
pub trait Containment {
    /// Returns true if `point` lies inside the shape.
    fn contains(&self, point: Vec3) -> bool;
}

impl<F> Containment for F
where
    F: Fn(Vec3) -> bool,
{
    fn contains(&self, point: Vec3) -> bool {
        self(point)
    }
}

/// Ray directions for parity tests. Each is skewed off every axis and
/// diagonal, and no two are close to parallel.
const PARITY_RAYS: [Vec3; 3] = [
    Vec3::new(0.947_607, 0.296_527, 0.118_611),
    Vec3::new(-0.284_217, 0.149_053, 0.947_097),
    Vec3::new(0.185_641, -0.935_182, 0.301_829),
];

/// Crossing-number test against a closed triangle soup.
///
/// Casts three rays from `point` and counts the triangles each one hits;
/// an odd count votes inside. The point is inside when at least two rays
/// agree. A ray leaving through an edge shared by two triangles hits both
/// and votes wrong, so a single ray is not enough.
pub fn parity_contains<I>(point: Vec3, triangles: I) -> bool
where
    I: IntoIterator<Item = [Vec3; 3]>,
    I::IntoIter: Clone,
{
    let triangles = triangles.into_iter();
    let votes = PARITY_RAYS
        .iter()
        .filter(|&&dir| crossings(point, dir, triangles.clone()) % 2 == 1)
        .count();
    votes >= 2
}

fn crossings(point: Vec3, dir: Vec3, triangles: impl Iterator<Item = [Vec3; 3]>) -> usize {
    triangles
        .filter_map(|[a, b, c]| ray_triangle(point, dir, a, b, c))
        .filter(|&t| t > 0.0)
        .count()
}
