//! Scalar type alias for the simulation.
//!
//! Lattice positions and forces are `f32` to match the external physics
//! engine and render buffers. The oscillator evaluates its closed form in
//! `f64` internally.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
