//! Lattice particles.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use squishy_types::ParticleId;

/// Where a particle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// A welded surface vertex.
    Shell,
    /// Seeded inside the volume by the fill grid.
    Fill,
}

/// One point mass at build time.
///
/// Live position and velocity belong to the physics backend once the
/// lattice is handed over; these values are the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(id: ParticleId, position: Vec3, mass: f32, kind: ParticleKind) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            mass,
            kind,
        }
    }

    /// `1/mass`, or 0 for a non-positive mass (immovable).
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_shell(&self) -> bool {
        self.kind == ParticleKind::Shell
    }
}
