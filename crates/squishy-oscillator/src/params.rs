//! Oscillator physical parameters.

use serde::{Deserialize, Serialize};
use squishy_types::{SquishyError, SquishyResult};

/// Behaviour class selected by the damping ratio ζ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DampingRegime {
    /// ζ < 1: decaying oscillation around the target.
    Underdamped,
    /// ζ = 1: fastest approach without oscillation.
    CriticallyDamped,
    /// ζ > 1: slow approach as a sum of two real exponentials.
    Overdamped,
}

/// Physical parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorParams {
    /// Mass `m`. Must be positive.
    pub mass: f64,
    /// Spring stiffness `k`. Must be positive.
    pub stiffness: f64,
    /// Damping coefficient `c`. Must be non-negative.
    pub damping: f64,
}

impl Default for OscillatorParams {
    /// Unit mass, `k = 169`, `c = 26`: critically damped at ω0 = 13 rad/s.
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 169.0,
            damping: 26.0,
        }
    }
}

impl OscillatorParams {
    /// Creates parameters from raw coefficients.
    pub fn new(mass: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Parameters with the given damping ratio for a mass/stiffness pair.
    pub fn with_damping_ratio(mass: f64, stiffness: f64, zeta: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping: zeta * 2.0 * (stiffness * mass).sqrt(),
        }
    }

    /// Critically damped parameters for a mass/stiffness pair.
    pub fn critically_damped(mass: f64, stiffness: f64) -> Self {
        Self::with_damping_ratio(mass, stiffness, 1.0)
    }

    /// Damping ratio ζ = c / (2√(k·m)).
    #[inline]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency ω0 = √(k/m), in rad/s.
    #[inline]
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Regime for the current damping ratio.
    pub fn regime(&self) -> DampingRegime {
        let zeta = self.damping_ratio();
        if zeta < 1.0 {
            DampingRegime::Underdamped
        } else if zeta > 1.0 {
            DampingRegime::Overdamped
        } else {
            DampingRegime::CriticallyDamped
        }
    }

    /// Rejects parameters for which the closed form is undefined.
    pub fn validate(&self) -> SquishyResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "oscillator mass must be positive and finite, got {}",
                self.mass
            )));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "oscillator stiffness must be positive and finite, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "oscillator damping must be non-negative and finite, got {}",
                self.damping
            )));
        }
        Ok(())
    }
}
