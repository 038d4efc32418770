//! # squishy-math
//!
//! Linear algebra primitives for the squishy simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec2`, `Vec3`, etc.)
//! - Axis-aligned bounding boxes ([`Aabb`])
//! - Direction/length helpers that refuse degenerate vectors

pub mod aabb;
pub mod direction;

pub use aabb::Aabb;
pub use direction::direction_and_length;

// Re-export glam types as the canonical math types for squishy.
pub use glam::{Vec2, Vec3};
