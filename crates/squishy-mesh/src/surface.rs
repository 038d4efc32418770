//! Closed-surface containment.

use glam::Vec3;
use squishy_geometry::{parity_contains, Containment};
use squishy_math::Aabb;

use crate::mesh::TriangleMesh;

/// The scaled triangles of a closed mesh, ready for repeated inside tests.
///
/// The mesh is assumed watertight. Open meshes still produce a stable
/// answer per point, just not a meaningful one.
#[derive(Debug, Clone)]
pub struct ClosedSurface {
    triangles: Vec<[Vec3; 3]>,
    bounds: Option<Aabb>,
}

impl ClosedSurface {
    /// Captures the scaled triangles of `mesh`.
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        let triangles = (0..mesh.triangle_count())
            .map(|t| mesh.scaled_triangle(t))
            .collect();
        Self {
            triangles,
            bounds: mesh.scaled_bounds(),
        }
    }

    /// Number of triangles tested per query.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Scaled bounds of the surface.
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }
}

impl Containment for ClosedSurface {
    fn contains(&self, point: Vec3) -> bool {
        match self.bounds {
            Some(b) if b.contains(point) => parity_contains(point, self.triangles.iter().copied()),
            _ => false,
        }
    }
}
