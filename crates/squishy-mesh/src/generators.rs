//! Procedural closed meshes for tests, benchmarks and the CLI.
//!
//! These mimic asset meshes: vertices are split per face or along seams,
//! so welding has real work to do.

use glam::Vec3;
use squishy_types::SquishyResult;

use crate::mesh::TriangleMesh;

/// Generates an axis-aligned cube of edge `size` centred at the origin.
///
/// Each face has its own four vertices (24 total, 8 unique positions) and
/// two triangles.
///
/// # Example
/// ```
/// use squishy_mesh::generators::cube;
/// let mesh = cube(1.0);
/// assert_eq!(mesh.vertex_count(), 24);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn cube(size: f32) -> TriangleMesh {
    let h = size / 2.0;
    let c = |x: f32, y: f32, z: f32| Vec3::new(x * h, y * h, z * h);

    // Counter-clockwise seen from outside.
    let faces = [
        [c(1., -1., -1.), c(1., 1., -1.), c(1., 1., 1.), c(1., -1., 1.)],
        [c(-1., -1., -1.), c(-1., -1., 1.), c(-1., 1., 1.), c(-1., 1., -1.)],
        [c(-1., 1., -1.), c(-1., 1., 1.), c(1., 1., 1.), c(1., 1., -1.)],
        [c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.), c(-1., -1., 1.)],
        [c(-1., -1., 1.), c(1., -1., 1.), c(1., 1., 1.), c(-1., 1., 1.)],
        [c(-1., -1., -1.), c(-1., 1., -1.), c(1., 1., -1.), c(1., -1., -1.)],
    ];

    let mut mesh = TriangleMesh::with_capacity(24, 12);
    for quad in faces {
        let base = mesh.vertex_count() as u32;
        for p in quad {
            mesh.push_vertex(p);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Generates a UV sphere centered at the origin.
///
/// The seam column and the pole rings are duplicated, as in a textured
/// asset.
///
/// # Arguments
/// - `radius`: Sphere radius.
/// - `stacks`: Number of horizontal slices (latitude divisions).
/// - `slices`: Number of vertical slices (longitude divisions).
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> TriangleMesh {
    let vertex_count = (stacks + 1) * (slices + 1);
    let tri_count = stacks * slices * 2;
    let mut mesh = TriangleMesh::with_capacity(vertex_count, tri_count);

    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32; // 0 to PI
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..=slices {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            // Snap the seam and poles so duplicates are bit-identical.
            let (sin_theta, cos_theta) = if j == slices {
                (0.0, 1.0)
            } else {
                (sin_theta, cos_theta)
            };
            let sin_phi = if i == 0 || i == stacks { 0.0 } else { sin_phi };

            mesh.push_vertex(Vec3::new(
                radius * sin_phi * cos_theta,
                radius * cos_phi,
                radius * sin_phi * sin_theta,
            ));
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * (slices + 1) + j) as u32;
            let b = a + (slices + 1) as u32;

            // Skip degenerate triangles at poles
            if i != 0 {
                mesh.indices.extend_from_slice(&[a, b, a + 1]);
            }
            if i != stacks - 1 {
                mesh.indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
    }

    mesh
}

/// Generates a closed prism with regular `sides`-gon caps, built from
/// polygon faces (the caps are ear clipped).
pub fn prism(sides: usize, radius: f32, height: f32) -> SquishyResult<TriangleMesh> {
    let h = height / 2.0;
    let mut positions = Vec::with_capacity(sides * 2);
    for y in [-h, h] {
        for k in 0..sides {
            let theta = 2.0 * std::f32::consts::PI * k as f32 / sides as f32;
            positions.push(Vec3::new(radius * theta.cos(), y, radius * theta.sin()));
        }
    }

    let n = sides as u32;
    let mut faces: Vec<Vec<u32>> = Vec::with_capacity(sides + 2);
    faces.push((0..n).collect());
    faces.push((n..2 * n).rev().collect());
    for k in 0..n {
        let next = (k + 1) % n;
        faces.push(vec![k, n + k, n + next, next]);
    }

    TriangleMesh::from_polygons(&positions, &faces)
}
