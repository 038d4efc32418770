//! # squishy-lattice
//!
//! The deformable lattice a soft body is simulated on: point masses seeded
//! on and inside a closed surface, connected by springs.
//!
//! ## Key Types
//!
//! - [`Particle`] / [`ParticleKind`]: one point mass, shell or fill
//! - [`Spring`] / [`SpringParams`]: one connection between two particles
//! - [`RestShape`]: per-particle offsets from the build-time center of mass
//! - [`Lattice`]: the arena of particles and springs plus the rest shape
//! - [`LatticeBuilder`]: weld, fill, connect, snapshot
//! - [`LatticeConfig`]: build parameters

pub mod builder;
pub mod config;
pub mod grid;
pub mod lattice;
pub mod particle;
pub mod rest_shape;
pub mod spring;

pub use builder::LatticeBuilder;
pub use config::LatticeConfig;
pub use grid::PointGrid;
pub use lattice::Lattice;
pub use particle::{Particle, ParticleKind};
pub use rest_shape::RestShape;
pub use spring::{Spring, SpringParams};
