//! Solver strategy trait.
//!
//! A strategy turns lattice topology plus live kinematic state into forces
//! for one fixed step. The host calls:
//!
//! ```text
//! solver.init(lattice, config)?;
//! loop {
//!     solver.step(lattice, backend, dt)?;
//!     // engine integrates
//! }
//! ```

use squishy_lattice::Lattice;
use squishy_types::SquishyResult;

use crate::backend::PhysicsBackend;
use crate::config::SolverConfig;

/// Result of a solver step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepResult {
    /// Springs that contributed forces.
    pub springs_processed: u32,
    /// Springs skipped because their endpoints coincided.
    pub springs_skipped: u32,
    /// Springs whose far end had its velocity clamped.
    pub clamped: u32,
    /// Σ ½·k·(rest − length)² at the start of the step.
    pub elastic_energy: f64,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for per-step force solvers.
pub trait SolverStrategy: Send {
    /// Sizes internal buffers for `lattice` and adopts `config`.
    ///
    /// Called after every rebuild.
    fn init(&mut self, lattice: &Lattice, config: &SolverConfig) -> SquishyResult<()>;

    /// Reads state from `backend`, computes forces and writes them back.
    ///
    /// Never integrates positions. Velocities are only touched by
    /// corrections the strategy documents.
    fn step(
        &mut self,
        lattice: &Lattice,
        backend: &mut dyn PhysicsBackend,
        dt: f32,
    ) -> SquishyResult<StepResult>;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}
