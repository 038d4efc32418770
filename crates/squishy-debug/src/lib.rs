//! # squishy-debug
//!
//! Debugging aids for soft bodies: an owned queue of timed overlay draw
//! requests, overlay flags, inspection hooks into the fixed step, and
//! binary state snapshots for replay.
//!
//! ## Key Types
//!
//! - [`DrawQueue`]: timed line/sphere requests, drained once per frame
//! - [`DebugDrawFlags`]: which overlays a soft body enqueues
//! - [`InspectionHook`]: callbacks around each fixed step
//! - [`StateSnapshot`]: bincode-serialized positions and velocities

pub mod draw;
pub mod flags;
pub mod hooks;
pub mod snapshot;

pub use draw::{Color, DrawQueue, DrawRequest, DrawShape};
pub use flags::DebugDrawFlags;
pub use hooks::{InspectionHook, TelemetryHook};
pub use snapshot::StateSnapshot;
