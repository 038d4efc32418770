//! # squishy-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the squishy soft-body simulator.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other squishy crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{SquishyError, SquishyResult};
pub use ids::{ParticleId, SpringId};
pub use scalar::Scalar;
