//! Axis-aligned bounding box.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box given by its min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all `points`. Returns `None` for an empty set.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    /// Edge lengths along each axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Geometric centre.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Largest edge length.
    #[inline]
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    /// Enclosed volume. Zero for flat or inverted boxes.
    pub fn volume(&self) -> f32 {
        let s = self.size();
        if s.x <= 0.0 || s.y <= 0.0 || s.z <= 0.0 {
            0.0
        } else {
            s.x * s.y * s.z
        }
    }

    /// Returns a copy scaled component-wise about the origin.
    pub fn scaled(&self, scale: Vec3) -> Self {
        let a = self.min * scale;
        let b = self.max * scale;
        Self::new(a.min(b), a.max(b))
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_encloses_all() {
        let aabb = Aabb::from_points([
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.5),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 0.5));
        assert_eq!(aabb.max_extent(), 5.0);
    }

    #[test]
    fn flat_box_has_no_volume() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(aabb.volume(), 0.0);
    }

    #[test]
    fn negative_scale_keeps_min_below_max() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE).scaled(Vec3::new(-2.0, 1.0, 1.0));
        assert_eq!(aabb.min.x, -2.0);
        assert_eq!(aabb.max.x, 0.0);
    }
}
