//! The physics engine contract.
//!
//! A soft body does not integrate motion. It reads kinematic state from,
//! and writes forces into, whatever engine owns the particle bodies.

use glam::Vec3;
use squishy_lattice::Particle;

use crate::config::BodyConfig;

/// Per-particle access to an external physics engine.
///
/// Index `i` addresses the body created for lattice particle `i`. Indices
/// are only valid until the next [`spawn_bodies`](Self::spawn_bodies).
pub trait PhysicsBackend {
    /// Number of bodies.
    fn particle_count(&self) -> usize;

    fn position(&self, i: usize) -> Vec3;

    fn set_position(&mut self, i: usize, position: Vec3);

    fn velocity(&self, i: usize) -> Vec3;

    fn set_velocity(&mut self, i: usize, velocity: Vec3);

    fn mass(&self, i: usize) -> f32;

    /// Accumulates a force for the current step. The engine clears
    /// accumulated forces after it integrates.
    fn apply_force(&mut self, i: usize, force: Vec3);

    /// Destroys every existing body and creates one per particle, at the
    /// particle's position and with its mass unless overridden.
    fn spawn_bodies(&mut self, particles: &[Particle], config: &BodyConfig);

    /// Pushes gravity, mass override, damping and axis locks to every body.
    fn configure_bodies(&mut self, config: &BodyConfig);
}
