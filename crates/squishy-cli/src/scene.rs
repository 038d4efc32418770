//! JSON scene files for `squishy simulate`.
//!
//! ```json
//! {
//!   "mesh": { "kind": "sphere", "radius": 1.0, "stacks": 8, "slices": 12 },
//!   "origin": [0.0, 1.0, 0.0],
//!   "ground": 0.0,
//!   "steps": 240,
//!   "config": { "solver": { "stiffness": 300.0 } }
//! }
//! ```
//!
//! Every field is optional.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use squishy_lattice::LatticeConfig;
use squishy_mesh::generators::{cube, prism, uv_sphere};
use squishy_mesh::TriangleMesh;
use squishy_solver::{BodyConfig, SoftBodyConfig, SolverConfig};
use squishy_types::constants::DEFAULT_DT;
use squishy_types::{SquishyError, SquishyResult};

/// Where the surface mesh of a scene comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshSource {
    Cube {
        size: f32,
    },
    Sphere {
        radius: f32,
        stacks: usize,
        slices: usize,
    },
    Prism {
        sides: usize,
        radius: f32,
        height: f32,
    },
    /// Explicit polygon faces over a shared position list.
    Polygons {
        positions: Vec<[f32; 3]>,
        faces: Vec<Vec<u32>>,
    },
}

impl MeshSource {
    pub fn build(&self) -> SquishyResult<TriangleMesh> {
        match self {
            MeshSource::Cube { size } => Ok(cube(*size)),
            MeshSource::Sphere {
                radius,
                stacks,
                slices,
            } => {
                if *stacks < 2 || *slices < 3 {
                    return Err(SquishyError::InvalidMesh(format!(
                        "sphere needs at least 2 stacks and 3 slices, got {stacks}x{slices}"
                    )));
                }
                Ok(uv_sphere(*radius, *stacks, *slices))
            }
            MeshSource::Prism {
                sides,
                radius,
                height,
            } => prism(*sides, *radius, *height),
            MeshSource::Polygons { positions, faces } => {
                let positions: Vec<Vec3> = positions.iter().map(|p| Vec3::from_array(*p)).collect();
                TriangleMesh::from_polygons(&positions, faces)
            }
        }
    }
}

/// A soft body, its placement and how long to run it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub mesh: MeshSource,
    /// Per-axis mesh scale.
    pub scale: [f32; 3],
    pub origin: [f32; 3],
    /// Ground plane height; `null` for none.
    pub ground: Option<f32>,
    pub steps: u32,
    pub dt: f32,
    pub config: SoftBodyConfig,
}

impl Default for Scene {
    /// A unit jelly cube dropped half a unit onto the ground.
    fn default() -> Self {
        Self {
            mesh: MeshSource::Cube { size: 1.0 },
            scale: [1.0; 3],
            origin: [0.0, 1.0, 0.0],
            ground: Some(0.0),
            steps: 120,
            dt: DEFAULT_DT,
            config: SoftBodyConfig {
                lattice: LatticeConfig {
                    connection_distance: Some(0.3),
                    ..LatticeConfig::with_radius(0.05)
                },
                solver: SolverConfig::jelly(),
                body: BodyConfig {
                    mass_override: Some(5.0),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }
}

impl Scene {
    /// Reads and validates a scene file.
    pub fn load(path: impl AsRef<Path>) -> SquishyResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&text)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_json(text: &str) -> SquishyResult<Self> {
        serde_json::from_str(text).map_err(|e| SquishyError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> SquishyResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SquishyError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.dt
            )));
        }
        self.config.validate()
    }

    /// The scaled surface mesh.
    pub fn build_mesh(&self) -> SquishyResult<TriangleMesh> {
        Ok(self.mesh.build()?.with_scale(Vec3::from_array(self.scale)))
    }

    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }
}
