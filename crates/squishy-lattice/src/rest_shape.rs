//! Rest-shape snapshot used by shape retention.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Offsets of every particle from the mass-weighted center at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestShape {
    pub center: Vec3,
    pub offsets: Vec<Vec3>,
}

impl RestShape {
    /// Captures the rest shape of `positions` weighted by `masses`.
    ///
    /// Falls back to the unweighted mean when the total mass is not
    /// positive. An empty input yields an empty snapshot.
    pub fn capture(positions: &[Vec3], masses: &[f32]) -> Self {
        debug_assert_eq!(positions.len(), masses.len());
        if positions.is_empty() {
            return Self::default();
        }

        let total: f32 = masses.iter().sum();
        let center = if total > 0.0 {
            positions
                .iter()
                .zip(masses)
                .fold(Vec3::ZERO, |acc, (&p, &m)| acc + p * m)
                / total
        } else {
            positions.iter().copied().sum::<Vec3>() / positions.len() as f32
        };

        Self {
            center,
            offsets: positions.iter().map(|&p| p - center).collect(),
        }
    }

    /// Rest-state vector from particle `a` to particle `b`.
    #[inline]
    pub fn relative(&self, a: usize, b: usize) -> Vec3 {
        self.offsets[b] - self.offsets[a]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_sum_to_zero() {
        let positions = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 0.5, 2.0),
            Vec3::new(0.0, -1.0, 7.0),
        ];
        let shape = RestShape::capture(&positions, &[1.0; 3]);
        let sum: Vec3 = shape.offsets.iter().copied().sum();
        assert!(sum.length() < 1e-5);
    }

    #[test]
    fn weighted_center() {
        let positions = [Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)];
        let shape = RestShape::capture(&positions, &[3.0, 1.0]);
        assert!((shape.center - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn empty() {
        assert!(RestShape::capture(&[], &[]).is_empty());
    }
}
