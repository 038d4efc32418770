//! Spring constraint solver.
//!
//! Per spring `(A, B)`, in creation order, from one snapshot of positions
//! and velocities taken at the start of the step:
//!
//! ```text
//! dir, dist   = normalize(pB − pA), |pB − pA|
//! F           = k·(rest − dist)·dir − c·((vB − vA)·dt · dir)·dir
//! F_B += F·mA/(mA+mB)        F_A −= F·(1 − mA/(mA+mB))
//! dist > rest·maxStretch  ⇒  ΔvB += (pA + dir·rest·maxStretch) − pB
//! shape retention          ⇒  F_B += ks·(dir·|rest offset| − (pB − pA)),  F_A −= same
//! ```
//!
//! Forces land in a private per-particle buffer and are merged into the
//! backend in one pass, so the summed force per particle does not depend
//! on spring order.

use std::time::Instant;

use glam::Vec3;
use squishy_lattice::{Lattice, RestShape, Spring};
use squishy_math::direction_and_length;
use squishy_types::constants::MIN_SPRING_LENGTH;
use squishy_types::{SquishyError, SquishyResult};

use crate::backend::PhysicsBackend;
use crate::config::SolverConfig;
use crate::strategy::{SolverStrategy, StepResult};

/// Mass-spring solver with stretch clamping and shape retention.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSolver {
    config: SolverConfig,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    masses: Vec<f32>,
    forces: Vec<Vec3>,
    corrections: Vec<Vec3>,
    initialized: bool,
}

impl ConstraintSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Adopts new shape-retention settings. Per-spring parameters live on
    /// the springs themselves.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Forces computed by the last step, per particle.
    pub fn forces(&self) -> &[Vec3] {
        &self.forces
    }

    /// Velocity corrections computed by the last step, per particle.
    pub fn corrections(&self) -> &[Vec3] {
        &self.corrections
    }

    fn resize(&mut self, n: usize) {
        self.positions.resize(n, Vec3::ZERO);
        self.velocities.resize(n, Vec3::ZERO);
        self.masses.resize(n, 0.0);
        self.forces.resize(n, Vec3::ZERO);
        self.corrections.resize(n, Vec3::ZERO);
    }

    fn read_snapshot(&mut self, backend: &dyn PhysicsBackend) {
        for i in 0..self.positions.len() {
            self.positions[i] = backend.position(i);
            self.velocities[i] = backend.velocity(i);
            self.masses[i] = backend.mass(i);
        }
    }

    /// Fills the force and correction buffers from the current snapshot.
    fn accumulate(&mut self, springs: &[Spring], rest: &RestShape, dt: f32) -> StepResult {
        self.forces.fill(Vec3::ZERO);
        self.corrections.fill(Vec3::ZERO);

        let shape_k = self.config.shape_retention_stiffness;
        let shape_threshold = self.config.shape_retention_threshold;
        let mut result = StepResult::default();

        for spring in springs {
            let a = spring.a.index();
            let b = spring.b.index();
            let pa = self.positions[a];
            let pb = self.positions[b];
            let delta = pb - pa;

            let Some((dir, dist)) = direction_and_length(delta, MIN_SPRING_LENGTH) else {
                result.springs_skipped += 1;
                continue;
            };

            let total_mass = self.masses[a] + self.masses[b];
            if total_mass.is_nan() || total_mass <= 0.0 {
                result.springs_skipped += 1;
                continue;
            }
            let mass_ratio = self.masses[a] / total_mass;

            // Positive stretch (compressed) pushes B away from A.
            let stretch = spring.rest_length - dist;
            let spring_force = dir * (spring.stiffness * stretch);

            let relative_velocity = ((self.velocities[b] - self.velocities[a]) * dt).dot(dir);
            let damper_force = dir * (-spring.damping * relative_velocity);

            let total = spring_force + damper_force;
            self.forces[b] += total * mass_ratio;
            self.forces[a] -= total * (1.0 - mass_ratio);

            result.elastic_energy += 0.5 * spring.stiffness as f64 * (stretch as f64).powi(2);

            let max_distance = spring.max_length();
            if dist > max_distance {
                self.corrections[b] += (pa + dir * max_distance) - pb;
                result.clamped += 1;
            }

            if shape_k > 0.0 && a < rest.len() && b < rest.len() {
                let rest_length = rest.relative(a, b).length();
                let corrective = dir * rest_length - delta;
                if corrective.length() > shape_threshold {
                    let force = corrective * shape_k;
                    self.forces[b] += force;
                    self.forces[a] -= force;
                }
            }

            result.springs_processed += 1;
        }

        result
    }

    fn merge(&self, backend: &mut dyn PhysicsBackend) {
        for i in 0..self.forces.len() {
            if self.forces[i] != Vec3::ZERO {
                backend.apply_force(i, self.forces[i]);
            }
            if self.corrections[i] != Vec3::ZERO {
                let v = backend.velocity(i);
                backend.set_velocity(i, v + self.corrections[i]);
            }
        }
    }
}

impl SolverStrategy for ConstraintSolver {
    fn init(&mut self, lattice: &Lattice, config: &SolverConfig) -> SquishyResult<()> {
        config.validate()?;
        if let Some(bad) = lattice
            .springs
            .iter()
            .find(|s| s.b.index() >= lattice.particle_count())
        {
            return Err(SquishyError::ParticleOutOfBounds {
                index: bad.b.index(),
                count: lattice.particle_count(),
            });
        }
        self.config = config.clone();
        self.resize(lattice.particle_count());
        self.initialized = true;
        Ok(())
    }

    fn step(
        &mut self,
        lattice: &Lattice,
        backend: &mut dyn PhysicsBackend,
        dt: f32,
    ) -> SquishyResult<StepResult> {
        let start = Instant::now();

        if !self.initialized {
            return Err(SquishyError::InvalidConfig(
                "Solver not initialized. Call init() first.".into(),
            ));
        }
        let n = lattice.particle_count();
        if backend.particle_count() != n || self.positions.len() != n {
            return Err(SquishyError::ParticleOutOfBounds {
                index: n,
                count: backend.particle_count(),
            });
        }

        self.read_snapshot(backend);
        let mut result = self.accumulate(&lattice.springs, &lattice.rest_shape, dt);
        self.merge(backend);

        result.wall_time = start.elapsed().as_secs_f64();
        tracing::trace!(
            processed = result.springs_processed,
            skipped = result.springs_skipped,
            clamped = result.clamped,
            "constraint step"
        );
        Ok(result)
    }

    fn name(&self) -> &str {
        "spring_constraints"
    }
}
