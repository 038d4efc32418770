//! Solver, body and soft-body configuration.
//!
//! All structs are plain serde values with defaults. Editing one has no
//! effect until it is passed to
//! [`SoftBody::apply_configuration`](crate::SoftBody::apply_configuration).

use serde::{Deserialize, Serialize};
use squishy_debug::DebugDrawFlags;
use squishy_lattice::{LatticeConfig, SpringParams};
use squishy_types::constants::GRAVITY;
use squishy_types::{SquishyError, SquishyResult};

/// Configuration for the spring constraint solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Hooke stiffness copied onto every spring.
    pub stiffness: f32,

    /// Spring damping copied onto every spring.
    pub damping: f32,

    /// Max length / rest length before the stretch clamp engages.
    pub max_stretch: f32,

    /// Shape-retention stiffness. Zero disables shape retention.
    pub shape_retention_stiffness: f32,

    /// Corrections shorter than this are ignored.
    pub shape_retention_threshold: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            stiffness: 700.0,
            damping: 0.0,
            max_stretch: 1.5,
            shape_retention_stiffness: 4000.0,
            shape_retention_threshold: 0.01,
        }
    }
}

impl SolverConfig {
    /// Pairwise springs only, no shape retention.
    pub fn springs_only() -> Self {
        Self {
            shape_retention_stiffness: 0.0,
            ..Default::default()
        }
    }

    /// Soft, wobbly body: low stiffness with some damping.
    pub fn jelly() -> Self {
        Self {
            stiffness: 150.0,
            damping: 20.0,
            max_stretch: 2.0,
            shape_retention_stiffness: 600.0,
            ..Default::default()
        }
    }

    /// The per-spring subset of this config.
    pub fn spring_params(&self) -> SpringParams {
        SpringParams {
            stiffness: self.stiffness,
            damping: self.damping,
            max_stretch: self.max_stretch,
        }
    }

    pub fn validate(&self) -> SquishyResult<()> {
        self.spring_params().validate()?;
        if !(self.shape_retention_stiffness.is_finite() && self.shape_retention_stiffness >= 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "shape retention stiffness must be non-negative, got {}",
                self.shape_retention_stiffness
            )));
        }
        if !(self.shape_retention_threshold.is_finite() && self.shape_retention_threshold >= 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "shape retention threshold must be non-negative, got {}",
                self.shape_retention_threshold
            )));
        }
        Ok(())
    }
}

/// Per-axis position locks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLock {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisLock {
    pub const NONE: Self = Self {
        x: false,
        y: false,
        z: false,
    };

    /// Motion restricted to the XZ plane.
    pub const Y: Self = Self {
        x: false,
        y: true,
        z: false,
    };

    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

/// Physical properties pushed to every particle body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub use_gravity: bool,

    /// Gravity vector [gx, gy, gz].
    pub gravity: [f32; 3],

    /// Mass for every body. `None` keeps the lattice particle mass.
    pub mass_override: Option<f32>,

    /// Velocity damping rate (1/s).
    pub linear_damping: f32,

    pub locking: AxisLock,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            use_gravity: true,
            gravity: [0.0, -GRAVITY, 0.0],
            mass_override: None,
            linear_damping: 3.0,
            locking: AxisLock::NONE,
        }
    }
}

impl BodyConfig {
    /// No gravity and no damping; for isolated-system tests.
    pub fn free_floating() -> Self {
        Self {
            use_gravity: false,
            linear_damping: 0.0,
            ..Default::default()
        }
    }

    /// Effective gravity: zero when disabled.
    pub fn effective_gravity(&self) -> glam::Vec3 {
        if self.use_gravity {
            glam::Vec3::from_array(self.gravity)
        } else {
            glam::Vec3::ZERO
        }
    }

    pub fn validate(&self) -> SquishyResult<()> {
        if let Some(m) = self.mass_override {
            if !(m.is_finite() && m > 0.0) {
                return Err(SquishyError::InvalidConfig(format!(
                    "mass override must be positive, got {m}"
                )));
            }
        }
        if !(self.linear_damping.is_finite() && self.linear_damping >= 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "linear damping must be non-negative, got {}",
                self.linear_damping
            )));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(SquishyError::InvalidConfig("gravity must be finite".into()));
        }
        Ok(())
    }
}

/// Everything a [`SoftBody`](crate::SoftBody) is configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftBodyConfig {
    pub lattice: LatticeConfig,
    pub solver: SolverConfig,
    pub body: BodyConfig,
    pub debug_flags: DebugDrawFlags,
}

impl SoftBodyConfig {
    pub fn validate(&self) -> SquishyResult<()> {
        self.lattice.validate()?;
        self.solver.validate()?;
        self.body.validate()
    }
}
