//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Positions are stored unscaled, as they come from the asset. Lattice
//! construction works in scaled space via [`TriangleMesh::scaled_position`].

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use squishy_geometry::ear_clip_indices;
use squishy_math::Aabb;
use squishy_types::{SquishyError, SquishyResult};

/// A triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    // --- Triangle data ---
    /// Triangle indices: each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,

    /// Per-axis scale applied to positions when building a lattice.
    pub scale: Vec3,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the unscaled position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the unscaled position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the position of vertex `i` with the mesh scale applied.
    #[inline]
    pub fn scaled_position(&self, i: usize) -> Vec3 {
        self.position_vec3(i) * self.scale
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the scaled corner positions of triangle `t`.
    pub fn scaled_triangle(&self, t: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.scaled_position(a as usize),
            self.scaled_position(b as usize),
            self.scaled_position(c as usize),
        ]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, x: f32, y: f32, z: f32) {
        self.pos_x[i] = x;
        self.pos_y[i] = y;
        self.pos_z[i] = z;
    }

    /// Returns a copy of the mesh with a different scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Unscaled axis-aligned bounds. `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points((0..self.vertex_count()).map(|i| self.position_vec3(i)))
    }

    /// Bounds with the mesh scale applied.
    pub fn scaled_bounds(&self) -> Option<Aabb> {
        self.bounds().map(|b| b.scaled(self.scale))
    }

    /// Creates an empty mesh with pre-allocated capacity and unit scale.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
            scale: Vec3::ONE,
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, p: Vec3) -> u32 {
        self.pos_x.push(p.x);
        self.pos_y.push(p.y);
        self.pos_z.push(p.z);
        (self.pos_x.len() - 1) as u32
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    /// - Scale and positions are finite
    pub fn validate(&self) -> SquishyResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(SquishyError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(SquishyError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        if !self.scale.is_finite() {
            return Err(SquishyError::InvalidMesh(format!(
                "Scale {:?} is not finite",
                self.scale
            )));
        }

        for i in 0..n {
            if !self.position_vec3(i).is_finite() {
                return Err(SquishyError::InvalidMesh(format!(
                    "Vertex {i} has a non-finite position"
                )));
            }
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(SquishyError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(SquishyError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts from `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> SquishyResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(SquishyError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        for p in positions.chunks_exact(3) {
            mesh.pos_x.push(p[0]);
            mesh.pos_y.push(p[1]);
            mesh.pos_z.push(p[2]);
        }

        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }

    /// Constructs a mesh from planar polygon faces.
    ///
    /// Each face lists vertex indices in boundary order. Faces with more
    /// than three corners are projected onto the plane their normal is most
    /// aligned with and ear clipped. If any face fails to triangulate the
    /// whole mesh is rejected.
    pub fn from_polygons(positions: &[Vec3], faces: &[Vec<u32>]) -> SquishyResult<Self> {
        let mut mesh = Self::with_capacity(positions.len(), faces.len() * 2);
        for &p in positions {
            mesh.push_vertex(p);
        }

        for (f, face) in faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(SquishyError::InvalidMesh(format!(
                    "Face {f} references vertex {bad} (vertex count: {})",
                    positions.len()
                )));
            }

            match face.len() {
                0..=2 => {
                    return Err(SquishyError::InvalidMesh(format!(
                        "Face {f} has {} vertices, need at least 3",
                        face.len()
                    )));
                }
                3 => mesh.indices.extend_from_slice(face),
                _ => {
                    let corners: Vec<Vec3> = face.iter().map(|&i| positions[i as usize]).collect();
                    let flat = project_to_dominant_plane(&corners);
                    let tris = ear_clip_indices(&flat).map_err(|e| {
                        SquishyError::InvalidMesh(format!(
                            "Face {f} could not be triangulated: {e}"
                        ))
                    })?;
                    for [a, b, c] in tris {
                        mesh.indices.extend_from_slice(&[face[a], face[b], face[c]]);
                    }
                }
            }
        }

        mesh.validate()?;
        Ok(mesh)
    }
}

/// Newell normal of a (roughly planar) polygon.
fn newell_normal(corners: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, &cur) in corners.iter().enumerate() {
        let next = corners[(i + 1) % corners.len()];
        normal.x += (cur.y - next.y) * (cur.z + next.z);
        normal.y += (cur.z - next.z) * (cur.x + next.x);
        normal.z += (cur.x - next.x) * (cur.y + next.y);
    }
    normal
}

/// Drops the coordinate along the dominant normal axis, keeping the
/// polygon's orientation as seen from the front.
fn project_to_dominant_plane(corners: &[Vec3]) -> Vec<Vec2> {
    let n = newell_normal(corners);
    let abs = n.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        if n.x >= 0.0 {
            corners.iter().map(|p| Vec2::new(p.y, p.z)).collect()
        } else {
            corners.iter().map(|p| Vec2::new(p.z, p.y)).collect()
        }
    } else if abs.y >= abs.z {
        if n.y >= 0.0 {
            corners.iter().map(|p| Vec2::new(p.z, p.x)).collect()
        } else {
            corners.iter().map(|p| Vec2::new(p.x, p.z)).collect()
        }
    } else if n.z >= 0.0 {
        corners.iter().map(|p| Vec2::new(p.x, p.y)).collect()
    } else {
        corners.iter().map(|p| Vec2::new(p.y, p.x)).collect()
    }
}
