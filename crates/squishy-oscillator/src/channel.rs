//! Channel value types.

use std::fmt::Debug;
use std::ops::{Add, Sub};

use squishy_math::{Vec2, Vec3};

/// A value an [`Oscillator`](crate::Oscillator) can drive.
///
/// The closed-form solution is linear in the initial offset and velocity,
/// so a channel only needs addition, subtraction and scaling.
pub trait Animatable: Copy + Default + Debug + Add<Output = Self> + Sub<Output = Self> {
    /// Multiplies every component by `s`.
    fn scale(self, s: f64) -> Self;

    /// Squared magnitude, used for settle checks.
    fn magnitude_squared(self) -> f64;
}

impl Animatable for f64 {
    fn scale(self, s: f64) -> Self {
        self * s
    }

    fn magnitude_squared(self) -> f64 {
        self * self
    }
}

impl Animatable for f32 {
    fn scale(self, s: f64) -> Self {
        (self as f64 * s) as f32
    }

    fn magnitude_squared(self) -> f64 {
        (self as f64) * (self as f64)
    }
}

impl Animatable for Vec2 {
    fn scale(self, s: f64) -> Self {
        self * s as f32
    }

    fn magnitude_squared(self) -> f64 {
        self.length_squared() as f64
    }
}

impl Animatable for Vec3 {
    fn scale(self, s: f64) -> Self {
        self * s as f32
    }

    fn magnitude_squared(self) -> f64 {
        self.length_squared() as f64
    }
}
