//! Inspection hooks for live debugging.
//!
//! Hooks are called by a soft body around each fixed step and on rebuild.
//! They observe; they never modify simulation state.
//!
//! # Lifecycle
//!
//! ```text
//! hook.on_rebuild(...)
//! for each fixed step:
//!   hook.on_step_begin(...)
//!   hook.on_step_end(...)
//! hook.on_simulation_end()
//! ```

use squishy_telemetry::{EventKind, SimulationEvent};

/// Trait for simulation inspection hooks.
pub trait InspectionHook: Send {
    /// Called after a lattice (re)build.
    fn on_rebuild(&mut self, step: u64, shell: usize, fill: usize, springs: usize) {
        let _ = (step, shell, fill, springs);
    }

    /// Called at the beginning of each fixed step.
    fn on_step_begin(&mut self, step: u64, sim_time: f64) {
        let _ = (step, sim_time);
    }

    /// Called at the end of each fixed step.
    fn on_step_end(&mut self, step: u64, wall_time: f64, clamped: u32) {
        let _ = (step, wall_time, clamped);
    }

    /// Called when the simulation completes.
    fn on_simulation_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Hook that records lifecycle calls as telemetry events.
#[derive(Debug, Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl InspectionHook for TelemetryHook {
    fn on_rebuild(&mut self, step: u64, shell: usize, fill: usize, springs: usize) {
        self.events.push(SimulationEvent::new(
            step,
            EventKind::LatticeBuilt {
                shell_particles: shell as u32,
                fill_particles: fill as u32,
                springs: springs as u32,
            },
        ));
    }

    fn on_step_begin(&mut self, step: u64, sim_time: f64) {
        self.events
            .push(SimulationEvent::new(step, EventKind::StepBegin { sim_time }));
    }

    fn on_step_end(&mut self, step: u64, _wall_time: f64, clamped: u32) {
        if clamped > 0 {
            self.events
                .push(SimulationEvent::new(step, EventKind::StretchClamp { clamped }));
        }
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
