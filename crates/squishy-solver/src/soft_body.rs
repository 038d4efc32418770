//! Soft body host.
//!
//! Owns one lattice, the solver, and the physics backend the particle
//! bodies live in. The surrounding application drives it with three calls:
//!
//! ```text
//! body.rebuild(&mesh, origin)?;            // load time / explicit rebuild
//! every fixed step:  body.fixed_update(dt)?; engine integrates
//! every frame:       body.frame_update(&mut draw_queue); upload render_positions()
//! ```

use glam::Vec3;
use squishy_debug::{Color, DebugDrawFlags, DrawQueue, InspectionHook, StateSnapshot};
use squishy_lattice::{Lattice, LatticeBuilder};
use squishy_mesh::TriangleMesh;
use squishy_telemetry::{EventBus, EventKind, SimulationEvent};
use squishy_types::{ParticleId, SquishyResult};

use crate::backend::PhysicsBackend;
use crate::body_set::BodySet;
use crate::config::SoftBodyConfig;
use crate::constraint::ConstraintSolver;
use crate::strategy::{SolverStrategy, StepResult};

/// A deformable body simulated as a particle-and-spring lattice.
pub struct SoftBody<B: PhysicsBackend> {
    backend: B,
    lattice: Lattice,
    solver: ConstraintSolver,
    config: SoftBodyConfig,
    /// Reported world position; follows the mean particle position.
    origin: Vec3,
    step: u64,
    sim_time: f64,
    bus: EventBus,
    hooks: Vec<Box<dyn InspectionHook>>,
}

impl<B: PhysicsBackend> SoftBody<B> {
    /// Creates a host with an empty lattice. Call [`rebuild`](Self::rebuild)
    /// before stepping.
    pub fn new(backend: B, config: SoftBodyConfig) -> SquishyResult<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            lattice: Lattice::default(),
            solver: ConstraintSolver::new(config.solver.clone()),
            config,
            origin: Vec3::ZERO,
            step: 0,
            sim_time: 0.0,
            bus: EventBus::new(),
            hooks: Vec::new(),
        })
    }

    /// Discards the current lattice and bodies and builds new ones from
    /// `mesh`, placed at `origin`.
    ///
    /// Particle ids and vertex tables from before the call are invalid
    /// afterwards.
    pub fn rebuild(&mut self, mesh: &TriangleMesh, origin: Vec3) -> SquishyResult<()> {
        let builder = LatticeBuilder::new(self.config.lattice.clone())
            .with_spring_params(self.config.solver.spring_params());
        let mut lattice = builder.build(mesh)?;

        for particle in &mut lattice.particles {
            particle.position += origin;
        }
        lattice.rest_shape.center += origin;

        self.backend.spawn_bodies(&lattice.particles, &self.config.body);
        self.solver.init(&lattice, &self.config.solver)?;
        self.origin = origin;
        self.lattice = lattice;

        let (shell, fill, springs) = (
            self.lattice.shell_count,
            self.lattice.fill_count(),
            self.lattice.spring_count(),
        );
        self.bus.emit(SimulationEvent::new(
            self.step,
            EventKind::LatticeBuilt {
                shell_particles: shell as u32,
                fill_particles: fill as u32,
                springs: springs as u32,
            },
        ));
        for hook in &mut self.hooks {
            hook.on_rebuild(self.step, shell, fill, springs);
        }
        self.bus.flush();
        Ok(())
    }

    /// Applies an edited configuration.
    ///
    /// Spring parameters are rewritten on every spring, body properties are
    /// pushed to every body, and shape retention switches immediately.
    /// Lattice parameters only take effect at the next rebuild.
    pub fn apply_configuration(&mut self, config: SoftBodyConfig) -> SquishyResult<()> {
        config.validate()?;

        let rebuild_pending = config.lattice != self.config.lattice;
        self.lattice.set_spring_params(&config.solver.spring_params());
        self.solver.set_config(config.solver.clone());
        self.backend.configure_bodies(&config.body);
        self.config = config;

        tracing::debug!(
            springs = self.lattice.spring_count(),
            bodies = self.backend.particle_count(),
            rebuild_pending,
            "soft body configuration applied"
        );
        Ok(())
    }

    /// Runs the constraint solver for one fixed step.
    ///
    /// A degenerate lattice (no springs) is skipped and yields an empty
    /// result.
    pub fn fixed_update(&mut self, dt: f32) -> SquishyResult<StepResult> {
        if self.lattice.is_degenerate() {
            tracing::trace!("degenerate lattice; fixed step skipped");
            self.advance_clock(dt);
            return Ok(StepResult::default());
        }

        self.bus.emit(SimulationEvent::new(
            self.step,
            EventKind::StepBegin {
                sim_time: self.sim_time,
            },
        ));
        for hook in &mut self.hooks {
            hook.on_step_begin(self.step, self.sim_time);
        }

        let result = self.solver.step(&self.lattice, &mut self.backend, dt)?;

        self.bus.emit(SimulationEvent::new(
            self.step,
            EventKind::StepEnd {
                wall_time: result.wall_time,
                springs_processed: result.springs_processed,
                springs_skipped: result.springs_skipped,
            },
        ));
        if result.clamped > 0 {
            self.bus.emit(SimulationEvent::new(
                self.step,
                EventKind::StretchClamp {
                    clamped: result.clamped,
                },
            ));
        }
        self.bus.emit(SimulationEvent::new(
            self.step,
            EventKind::Energy {
                kinetic: self.kinetic_energy(),
                elastic: result.elastic_energy,
            },
        ));
        for hook in &mut self.hooks {
            hook.on_step_end(self.step, result.wall_time, result.clamped);
        }
        self.bus.flush();

        self.advance_clock(dt);
        Ok(result)
    }

    fn advance_clock(&mut self, dt: f32) {
        self.step += 1;
        self.sim_time += dt as f64;
    }

    /// Per-frame work: recentres the origin on the mean particle position
    /// and enqueues the overlays selected by the debug flags.
    pub fn frame_update(&mut self, queue: &mut DrawQueue) {
        self.update_center();
        self.enqueue_debug_draws(queue);
    }

    /// Moves the origin to the mean particle position. No-op without
    /// particles.
    pub fn update_center(&mut self) {
        let n = self.backend.particle_count();
        if n == 0 {
            return;
        }
        let sum = (0..n).fold(Vec3::ZERO, |acc, i| acc + self.backend.position(i));
        self.origin = sum / n as f32;
    }

    /// Pushes one-frame overlay requests for the enabled debug flags.
    pub fn enqueue_debug_draws(&self, queue: &mut DrawQueue) {
        let flags = self.config.debug_flags;
        if flags.is_empty() {
            return;
        }

        if flags.contains(DebugDrawFlags::SPRINGS) {
            for spring in &self.lattice.springs {
                queue.line(
                    self.backend.position(spring.a.index()),
                    self.backend.position(spring.b.index()),
                    Color::indexed(spring.a.index()),
                    0.0,
                );
            }
        }

        let radius = self.lattice.config.particle_radius;
        for i in 0..self.backend.particle_count() {
            let is_shell = i < self.lattice.shell_count;
            if is_shell && flags.contains(DebugDrawFlags::SHELL_PARTICLES) {
                queue.sphere(self.backend.position(i), radius, Color::RED, 0.0);
            } else if !is_shell && flags.contains(DebugDrawFlags::FILL_PARTICLES) {
                queue.sphere(self.backend.position(i), radius, Color::WHITE, 0.0);
            }
        }
    }

    /// Shell particle positions relative to the origin, in shell order.
    /// Index with [`vertex_particle_ids`](Self::vertex_particle_ids) to get
    /// per-vertex offsets.
    pub fn render_positions(&self) -> Vec<Vec3> {
        (0..self.lattice.shell_count.min(self.backend.particle_count()))
            .map(|i| self.backend.position(i) - self.origin)
            .collect()
    }

    /// Current world position of every particle, in id order.
    pub fn particle_positions(&self) -> Vec<Vec3> {
        (0..self.backend.particle_count())
            .map(|i| self.backend.position(i))
            .collect()
    }

    /// Σ ½·m·|v|² over all bodies.
    pub fn kinetic_energy(&self) -> f64 {
        (0..self.backend.particle_count())
            .map(|i| {
                let m = self.backend.mass(i) as f64;
                if m > 0.0 {
                    0.5 * m * self.backend.velocity(i).length_squared() as f64
                } else {
                    0.0
                }
            })
            .sum()
    }

    /// Positions and velocities for replay.
    pub fn snapshot(&self) -> StateSnapshot {
        let n = self.backend.particle_count();
        let positions: Vec<Vec3> = (0..n).map(|i| self.backend.position(i)).collect();
        let velocities: Vec<Vec3> = (0..n).map(|i| self.backend.velocity(i)).collect();
        StateSnapshot::from_points(self.step, self.sim_time, &positions, &velocities)
    }

    /// Number of shell particles; they occupy ids `0..shell_count`.
    pub fn shell_count(&self) -> usize {
        self.lattice.shell_count
    }

    /// For each source mesh vertex, the particle simulating it.
    pub fn vertex_particle_ids(&self) -> &[ParticleId] {
        &self.lattice.vertex_to_particle
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn config(&self) -> &SoftBodyConfig {
        &self.config
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// The telemetry bus; register sinks here.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn add_hook(&mut self, hook: Box<dyn InspectionHook>) {
        tracing::debug!(hook = hook.name(), "inspection hook added");
        self.hooks.push(hook);
    }

    /// Notifies hooks and sinks that the simulation is over.
    pub fn finish(&mut self) {
        for hook in &mut self.hooks {
            hook.on_simulation_end();
        }
        self.bus.finish();
    }
}

impl SoftBody<BodySet> {
    /// Solver step followed by integration in the built-in backend.
    pub fn advance(&mut self, dt: f32) -> SquishyResult<StepResult> {
        let result = self.fixed_update(dt)?;
        self.backend.integrate(dt);
        Ok(result)
    }
}
