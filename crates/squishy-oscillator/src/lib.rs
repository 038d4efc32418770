//! # squishy-oscillator
//!
//! Closed-form damped harmonic oscillator. Values are animated toward a
//! target by evaluating the exact solution of `m·x'' + c·x' + k·x = 0` at the
//! time elapsed since the last retarget, so there is no per-step numerical
//! integration and no drift.
//!
//! ## Key Types
//!
//! - [`OscillatorParams`]: mass, stiffness, damping; regime classification
//! - [`Oscillator`]: one animated channel (scalar, 2D or 3D)
//! - [`Animatable`]: what a channel value must support

pub mod channel;
pub mod oscillator;
pub mod params;
pub mod response;

pub use channel::Animatable;
pub use oscillator::Oscillator;
pub use params::{DampingRegime, OscillatorParams};
pub use response::Response;
