//! Benchmark scenarios: procedural mesh, placement and config for each case.
//!
//! Three canonical scenarios for regression testing:
//! 1. **Cube drop**: a cube falls onto the ground plane
//! 2. **Sphere squash**: a sphere resting on the ground is hit downward
//! 3. **Prism wobble**: a free-floating hexagonal prism is sheared and
//!    left to spring back

use glam::Vec3;
use serde::{Deserialize, Serialize};

use squishy_lattice::LatticeConfig;
use squishy_mesh::generators::{cube, prism, uv_sphere};
use squishy_mesh::TriangleMesh;
use squishy_solver::{BodyConfig, SoftBodyConfig, SolverConfig};
use squishy_types::constants::DEFAULT_DT;
use squishy_types::SquishyResult;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Cube dropped onto the ground under gravity.
    CubeDrop,
    /// Sphere on the ground given a downward impact velocity.
    SphereSquash,
    /// Prism in free space with an initial shear velocity field.
    PrismWobble,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::CubeDrop,
            ScenarioKind::SphereSquash,
            ScenarioKind::PrismWobble,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::CubeDrop => "cube_drop",
            ScenarioKind::SphereSquash => "sphere_squash",
            ScenarioKind::PrismWobble => "prism_wobble",
        }
    }

    /// Parses a name produced by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    pub kind: ScenarioKind,
    /// Surface mesh the lattice is built from.
    pub mesh: TriangleMesh,
    /// World position the lattice is placed at.
    pub origin: Vec3,
    pub config: SoftBodyConfig,
    /// Ground plane height, if any.
    pub ground: Option<f32>,
    /// Velocity given to every particle before the first step.
    pub initial_velocity: Vec3,
    /// Extra X velocity per unit of height above the origin.
    pub shear_rate: f32,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
}

impl Scenario {
    /// Soft body settings shared by all scenarios: the jelly preset on
    /// heavier particles.
    fn base_config(lattice: LatticeConfig) -> SoftBodyConfig {
        SoftBodyConfig {
            lattice,
            solver: SolverConfig::jelly(),
            body: BodyConfig {
                mass_override: Some(5.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create the cube drop scenario.
    ///
    /// A unit cube starting half a unit above the ground, falling for
    /// 2 seconds at 60fps. The connection distance is widened so the
    /// corner particles join the lattice.
    pub fn cube_drop() -> Self {
        let lattice = LatticeConfig {
            connection_distance: Some(0.3),
            ..LatticeConfig::with_radius(0.05)
        };
        Self {
            kind: ScenarioKind::CubeDrop,
            mesh: cube(1.0),
            origin: Vec3::new(0.0, 1.0, 0.0),
            config: Self::base_config(lattice),
            ground: Some(0.0),
            initial_velocity: Vec3::ZERO,
            shear_rate: 0.0,
            timesteps: 120,
            dt: DEFAULT_DT,
        }
    }

    /// Create the sphere squash scenario.
    ///
    /// A unit-radius sphere touching the ground, moving down at 4 units/s.
    pub fn sphere_squash() -> Self {
        Self {
            kind: ScenarioKind::SphereSquash,
            mesh: uv_sphere(1.0, 8, 12),
            origin: Vec3::new(0.0, 1.0, 0.0),
            config: Self::base_config(LatticeConfig::with_radius(0.15)),
            ground: Some(0.0),
            initial_velocity: Vec3::new(0.0, -4.0, 0.0),
            shear_rate: 0.0,
            timesteps: 120,
            dt: DEFAULT_DT,
        }
    }

    /// Create the prism wobble scenario.
    ///
    /// A hexagonal prism without gravity, sheared along X and simulated
    /// for 3 seconds.
    pub fn prism_wobble() -> SquishyResult<Self> {
        let mut config = Self::base_config(LatticeConfig::with_radius(0.1));
        config.body.use_gravity = false;
        Ok(Self {
            kind: ScenarioKind::PrismWobble,
            mesh: prism(6, 1.0, 1.5)?,
            origin: Vec3::ZERO,
            config,
            ground: None,
            initial_velocity: Vec3::ZERO,
            shear_rate: 2.0,
            timesteps: 180,
            dt: DEFAULT_DT,
        })
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> SquishyResult<Self> {
        match kind {
            ScenarioKind::CubeDrop => Ok(Self::cube_drop()),
            ScenarioKind::SphereSquash => Ok(Self::sphere_squash()),
            ScenarioKind::PrismWobble => Self::prism_wobble(),
        }
    }

    /// Replace the number of timesteps.
    pub fn with_timesteps(mut self, timesteps: u32) -> Self {
        self.timesteps = timesteps;
        self
    }

    /// Initial velocity of a particle placed at `position`.
    pub fn velocity_at(&self, position: Vec3) -> Vec3 {
        self.initial_velocity + Vec3::X * self.shear_rate * (position.y - self.origin.y)
    }
}
