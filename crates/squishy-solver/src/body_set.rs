//! Reference physics backend: SoA particle bodies with semi-implicit
//! Euler integration.
//!
//! Stands in for an external engine in tests, benchmarks and the CLI. The
//! only collision it knows is an optional ground plane.

use glam::Vec3;
use squishy_debug::StateSnapshot;
use squishy_lattice::Particle;

use crate::backend::PhysicsBackend;
use crate::config::{AxisLock, BodyConfig};

/// SoA body buffers.
///
/// # Layout
///
/// All arrays have length `count`:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// pos_y: [y0, y1, y2, ...]
/// ...
/// ```
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    /// Number of bodies.
    pub count: usize,

    // ─── Position ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    // ─── Accumulated force (cleared by integrate) ───
    pub force_x: Vec<f32>,
    pub force_y: Vec<f32>,
    pub force_z: Vec<f32>,

    // ─── Mass ───
    /// Particle mass from the lattice, before any override.
    pub base_mass: Vec<f32>,
    pub mass: Vec<f32>,
    /// Zero for immovable bodies.
    pub inv_mass: Vec<f32>,

    // ─── Ground plane constraint ───
    /// Optional ground height (Y). Bodies below it are lifted back onto
    /// it, lose their downward velocity and have tangential velocity
    /// scaled by [`GROUND_FRICTION`](Self::GROUND_FRICTION).
    pub ground_height: Option<f32>,

    gravity: Vec3,
    linear_damping: f32,
    locking: AxisLock,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of tangential velocity kept by a body touching the ground.
    pub const GROUND_FRICTION: f32 = 0.5;

    /// Adds a ground plane at height `y`.
    pub fn with_ground(mut self, y: f32) -> Self {
        self.ground_height = Some(y);
        self
    }

    /// Creates one body per particle.
    pub fn from_particles(particles: &[Particle], config: &BodyConfig) -> Self {
        let mut set = Self::new();
        set.spawn_bodies(particles, config);
        set
    }

    /// Advances every body by `dt`:
    ///
    /// ```text
    /// v += (F/m + g)·dt;  v /= 1 + c·dt;  v[locked] = 0;  p += v·dt;  ground;  F = 0
    /// ```
    pub fn integrate(&mut self, dt: f32) {
        let damping = 1.0 / (1.0 + self.linear_damping * dt);
        let g = self.gravity;

        for i in 0..self.count {
            if self.inv_mass[i] == 0.0 {
                self.vel_x[i] = 0.0;
                self.vel_y[i] = 0.0;
                self.vel_z[i] = 0.0;
            } else {
                let w = self.inv_mass[i];
                self.vel_x[i] = (self.vel_x[i] + (self.force_x[i] * w + g.x) * dt) * damping;
                self.vel_y[i] = (self.vel_y[i] + (self.force_y[i] * w + g.y) * dt) * damping;
                self.vel_z[i] = (self.vel_z[i] + (self.force_z[i] * w + g.z) * dt) * damping;
            }

            if self.locking.x {
                self.vel_x[i] = 0.0;
            }
            if self.locking.y {
                self.vel_y[i] = 0.0;
            }
            if self.locking.z {
                self.vel_z[i] = 0.0;
            }

            self.pos_x[i] += self.vel_x[i] * dt;
            self.pos_y[i] += self.vel_y[i] * dt;
            self.pos_z[i] += self.vel_z[i] * dt;
        }

        self.enforce_ground();
        self.clear_forces();
    }

    fn enforce_ground(&mut self) {
        let Some(ground) = self.ground_height else {
            return;
        };
        for i in 0..self.count {
            if self.pos_y[i] < ground {
                self.pos_y[i] = ground;
                if self.vel_y[i] < 0.0 {
                    self.vel_y[i] = 0.0;
                }
                self.vel_x[i] *= Self::GROUND_FRICTION;
                self.vel_z[i] *= Self::GROUND_FRICTION;
            }
        }
    }

    pub fn clear_forces(&mut self) {
        self.force_x.fill(0.0);
        self.force_y.fill(0.0);
        self.force_z.fill(0.0);
    }

    /// Force accumulated since the last integrate.
    pub fn force(&self, i: usize) -> Vec3 {
        Vec3::new(self.force_x[i], self.force_y[i], self.force_z[i])
    }

    /// Total kinetic energy: 0.5 * Σ m_i * ||v_i||².
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0f64;
        for i in 0..self.count {
            if self.inv_mass[i] == 0.0 {
                continue;
            }
            let vx = self.vel_x[i] as f64;
            let vy = self.vel_y[i] as f64;
            let vz = self.vel_z[i] as f64;
            energy += 0.5 * self.mass[i] as f64 * (vx * vx + vy * vy + vz * vz);
        }
        energy
    }

    /// Total linear momentum Σ m_i · v_i.
    pub fn momentum(&self) -> Vec3 {
        (0..self.count).fold(Vec3::ZERO, |acc, i| acc + self.velocity(i) * self.mass[i])
    }

    /// Unweighted mean position, or the origin for an empty set.
    pub fn mean_position(&self) -> Vec3 {
        if self.count == 0 {
            return Vec3::ZERO;
        }
        (0..self.count).fold(Vec3::ZERO, |acc, i| acc + self.position(i)) / self.count as f32
    }

    /// Captures positions and velocities for replay.
    pub fn snapshot(&self, step: u64, sim_time: f64) -> StateSnapshot {
        StateSnapshot::from_soa(
            step,
            sim_time,
            &self.pos_x,
            &self.pos_y,
            &self.pos_z,
            &self.vel_x,
            &self.vel_y,
            &self.vel_z,
        )
    }

    /// Overwrites positions and velocities from a snapshot with the same
    /// body count. Returns false and leaves the set untouched otherwise.
    pub fn restore(&mut self, snapshot: &StateSnapshot) -> bool {
        if snapshot.particle_count != self.count {
            return false;
        }
        for i in 0..self.count {
            self.set_position(i, snapshot.position(i));
            self.set_velocity(i, snapshot.velocity(i));
        }
        self.clear_forces();
        true
    }

    fn set_mass(&mut self, i: usize, mass: f32) {
        self.mass[i] = mass;
        self.inv_mass[i] = if mass > 0.0 { 1.0 / mass } else { 0.0 };
    }
}

impl PhysicsBackend for BodySet {
    fn particle_count(&self) -> usize {
        self.count
    }

    fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    fn set_position(&mut self, i: usize, position: Vec3) {
        self.pos_x[i] = position.x;
        self.pos_y[i] = position.y;
        self.pos_z[i] = position.z;
    }

    fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    fn set_velocity(&mut self, i: usize, velocity: Vec3) {
        self.vel_x[i] = velocity.x;
        self.vel_y[i] = velocity.y;
        self.vel_z[i] = velocity.z;
    }

    fn mass(&self, i: usize) -> f32 {
        self.mass[i]
    }

    fn apply_force(&mut self, i: usize, force: Vec3) {
        self.force_x[i] += force.x;
        self.force_y[i] += force.y;
        self.force_z[i] += force.z;
    }

    fn spawn_bodies(&mut self, particles: &[Particle], config: &BodyConfig) {
        let n = particles.len();
        self.count = n;
        self.pos_x = particles.iter().map(|p| p.position.x).collect();
        self.pos_y = particles.iter().map(|p| p.position.y).collect();
        self.pos_z = particles.iter().map(|p| p.position.z).collect();
        self.vel_x = particles.iter().map(|p| p.velocity.x).collect();
        self.vel_y = particles.iter().map(|p| p.velocity.y).collect();
        self.vel_z = particles.iter().map(|p| p.velocity.z).collect();
        self.force_x = vec![0.0; n];
        self.force_y = vec![0.0; n];
        self.force_z = vec![0.0; n];
        self.base_mass = particles.iter().map(|p| p.mass).collect();
        self.mass = vec![0.0; n];
        self.inv_mass = vec![0.0; n];
        self.configure_bodies(config);
    }

    fn configure_bodies(&mut self, config: &BodyConfig) {
        self.gravity = config.effective_gravity();
        self.linear_damping = config.linear_damping;
        self.locking = config.locking;
        for i in 0..self.count {
            let mass = config.mass_override.unwrap_or(self.base_mass[i]);
            self.set_mass(i, mass);
        }
    }
}
