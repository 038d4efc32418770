//! Springs between particle pairs.

use serde::{Deserialize, Serialize};
use squishy_types::{ParticleId, SquishyError, SquishyResult};

/// Per-spring tuning, copied from lattice-wide defaults at build time and
/// rebroadcast on configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Hooke stiffness.
    pub stiffness: f32,
    /// Damping applied to relative velocity along the spring.
    pub damping: f32,
    /// Maximum length as a multiple of rest length before the velocity
    /// clamp engages.
    pub max_stretch: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 700.0,
            damping: 0.0,
            max_stretch: 1.5,
        }
    }
}

impl SpringParams {
    pub fn validate(&self) -> SquishyResult<()> {
        if !(self.stiffness.is_finite() && self.stiffness >= 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "spring stiffness must be non-negative, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "spring damping must be non-negative, got {}",
                self.damping
            )));
        }
        if !(self.max_stretch.is_finite() && self.max_stretch >= 1.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "max stretch ratio must be at least 1, got {}",
                self.max_stretch
            )));
        }
        Ok(())
    }
}

/// A connection between particles `a` and `b`, with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub a: ParticleId,
    pub b: ParticleId,
    /// Separation measured when the spring was created.
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub max_stretch: f32,
}

impl Spring {
    /// Creates a spring, ordering the endpoints so that `a < b`.
    ///
    /// Returns `None` for a self-connection.
    pub fn new(
        a: ParticleId,
        b: ParticleId,
        rest_length: f32,
        params: &SpringParams,
    ) -> Option<Self> {
        if a == b {
            return None;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        Some(Self {
            a,
            b,
            rest_length,
            stiffness: params.stiffness,
            damping: params.damping,
            max_stretch: params.max_stretch,
        })
    }

    /// Length beyond which the stretch clamp engages.
    #[inline]
    pub fn max_length(&self) -> f32 {
        self.rest_length * self.max_stretch
    }

    pub fn set_params(&mut self, params: &SpringParams) {
        self.stiffness = params.stiffness;
        self.damping = params.damping;
        self.max_stretch = params.max_stretch;
    }
}
