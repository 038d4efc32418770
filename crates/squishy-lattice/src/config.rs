//! Lattice build configuration.

use serde::{Deserialize, Serialize};
use squishy_types::constants::{DEFAULT_PARTICLE_RADIUS, DIAGONAL_FACTOR};
use squishy_types::{SquishyError, SquishyResult};

/// Parameters of the lattice build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Particle collision radius. Drives the fill-grid step and the
    /// minimum spacing between particles.
    pub particle_radius: f32,

    /// Fixed connection-distance threshold. When `None` it is derived from
    /// the fill-grid step as `step · scale.y · diagonal_factor`.
    pub connection_distance: Option<f32>,

    /// The fill-grid step is at least `max_extent / step_divisor`.
    pub step_divisor: f32,

    /// The fill-grid step is at least `particle_radius · step_radius_factor`.
    pub step_radius_factor: f32,

    /// Grid samples within `particle_radius · min_spacing_factor` of an
    /// existing particle are rejected.
    pub min_spacing_factor: f32,

    /// Multiplier from grid step to derived connection distance.
    pub diagonal_factor: f32,

    /// Mass given to every particle at build time.
    pub particle_mass: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            connection_distance: None,
            step_divisor: 6.0,
            step_radius_factor: 2.5,
            min_spacing_factor: 2.0,
            diagonal_factor: DIAGONAL_FACTOR,
            particle_mass: 1.0,
        }
    }
}

impl LatticeConfig {
    /// Config with the given particle radius and defaults elsewhere.
    pub fn with_radius(particle_radius: f32) -> Self {
        Self {
            particle_radius,
            ..Default::default()
        }
    }

    /// Denser fill: the grid step is bounded by `max_extent / 10`.
    pub fn fine(particle_radius: f32) -> Self {
        Self {
            particle_radius,
            step_divisor: 10.0,
            ..Default::default()
        }
    }

    /// Unscaled fill-grid step for a mesh whose largest unscaled extent is
    /// `max_extent`.
    pub fn grid_step(&self, max_extent: f32) -> f32 {
        (max_extent / self.step_divisor).max(self.particle_radius * self.step_radius_factor)
    }

    /// Minimum distance between a fill sample and any existing particle.
    pub fn min_spacing(&self) -> f32 {
        self.particle_radius * self.min_spacing_factor
    }

    pub fn validate(&self) -> SquishyResult<()> {
        let positive = [
            ("particle_radius", self.particle_radius),
            ("step_divisor", self.step_divisor),
            ("step_radius_factor", self.step_radius_factor),
            ("diagonal_factor", self.diagonal_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SquishyError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.min_spacing_factor.is_finite() && self.min_spacing_factor >= 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "min_spacing_factor must be non-negative, got {}",
                self.min_spacing_factor
            )));
        }
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "particle_mass must be positive, got {}",
                self.particle_mass
            )));
        }
        if let Some(d) = self.connection_distance {
            if !(d.is_finite() && d > 0.0) {
                return Err(SquishyError::InvalidConfig(format!(
                    "connection_distance must be positive, got {d}"
                )));
            }
        }
        Ok(())
    }
}
