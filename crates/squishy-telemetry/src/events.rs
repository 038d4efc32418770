//! Simulation event types.
//!
//! Events are small value types tagged with the fixed-step index they were
//! emitted in.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by a soft body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Fixed-step number (0-indexed).
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Fixed step started.
    StepBegin {
        /// Simulation time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Fixed step completed.
    StepEnd {
        /// Wall-clock time spent in the constraint solver (seconds).
        wall_time: f64,
        /// Springs that contributed forces.
        springs_processed: u32,
        /// Springs skipped because their endpoints coincided.
        springs_skipped: u32,
    },

    /// A lattice was (re)built.
    LatticeBuilt {
        shell_particles: u32,
        fill_particles: u32,
        springs: u32,
    },

    /// Springs hit their maximum stretch this step.
    StretchClamp {
        /// Number of springs whose far end had its velocity corrected.
        clamped: u32,
    },

    /// Energy snapshot after the step.
    Energy {
        /// Σ ½·m·|v|².
        kinetic: f64,
        /// Σ ½·k·(rest − length)² over springs.
        elastic: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
