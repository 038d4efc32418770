//! # squishy-solver
//!
//! Per-step force computation for particle-and-spring soft bodies, and the
//! host that ties a lattice to a physics engine.
//!
//! ## Key Types
//!
//! - [`PhysicsBackend`]: what the solver needs from the engine owning the bodies
//! - [`BodySet`]: SoA reference backend with semi-implicit Euler integration
//! - [`ConstraintSolver`]: springs, damping, stretch clamp, shape retention
//! - [`SolverStrategy`]: pluggable per-step solver trait
//! - [`SolverConfig`] / [`BodyConfig`] / [`SoftBodyConfig`]: configuration
//! - [`SoftBody`]: rebuild, apply configuration, fixed step, per-frame update

pub mod backend;
pub mod body_set;
pub mod config;
pub mod constraint;
pub mod soft_body;
pub mod strategy;

pub use backend::PhysicsBackend;
pub use body_set::BodySet;
pub use config::{AxisLock, BodyConfig, SoftBodyConfig, SolverConfig};
pub use constraint::ConstraintSolver;
pub use soft_body::SoftBody;
pub use strategy::{SolverStrategy, StepResult};
