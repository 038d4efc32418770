//! The built lattice.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use squishy_types::{ParticleId, SquishyError, SquishyResult};

use crate::config::LatticeConfig;
use crate::particle::{Particle, ParticleKind};
use crate::rest_shape::RestShape;
use crate::spring::{Spring, SpringParams};

/// Particles and springs of one soft body.
///
/// Shell particles occupy ids `0..shell_count`, fill particles follow.
/// Springs are stored once per pair with `a < b`, sorted by `(a, b)`.
/// A lattice is replaced wholesale on rebuild; ids from an old lattice
/// must not be reused.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lattice {
    pub particles: Vec<Particle>,
    pub springs: Vec<Spring>,
    pub rest_shape: RestShape,
    /// Number of shell particles at the front of `particles`.
    pub shell_count: usize,
    /// For each original mesh vertex, the particle it was welded into.
    pub vertex_to_particle: Vec<ParticleId>,
    /// Connection-distance threshold the springs were built with.
    pub connection_distance: f32,
    /// Per-axis fill-grid step (scaled).
    pub grid_step: Vec3,
    pub config: LatticeConfig,
}

impl Lattice {
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    #[inline]
    pub fn fill_count(&self) -> usize {
        self.particles.len() - self.shell_count
    }

    /// True when there is nothing to simulate.
    pub fn is_degenerate(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn shell_particles(&self) -> &[Particle] {
        &self.particles[..self.shell_count]
    }

    pub fn fill_particles(&self) -> &[Particle] {
        &self.particles[self.shell_count..]
    }

    pub fn particle(&self, id: ParticleId) -> SquishyResult<&Particle> {
        self.particles
            .get(id.index())
            .ok_or(SquishyError::ParticleOutOfBounds {
                index: id.index(),
                count: self.particles.len(),
            })
    }

    pub fn kind(&self, id: ParticleId) -> ParticleKind {
        if id.index() < self.shell_count {
            ParticleKind::Shell
        } else {
            ParticleKind::Fill
        }
    }

    /// Build-time positions in id order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Rewrites stiffness, damping and max stretch on every spring.
    pub fn set_spring_params(&mut self, params: &SpringParams) {
        for spring in &mut self.springs {
            spring.set_params(params);
        }
    }

    /// Number of springs touching each particle.
    pub fn degrees(&self) -> Vec<u32> {
        let mut degree = vec![0u32; self.particles.len()];
        for s in &self.springs {
            degree[s.a.index()] += 1;
            degree[s.b.index()] += 1;
        }
        degree
    }
}
