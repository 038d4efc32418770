//! # squishy-telemetry
//!
//! Event bus for simulation telemetry. The soft body emits structured
//! events (step timing, lattice rebuilds, stretch clamps, energy) that are
//! consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
