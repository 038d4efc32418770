//! Vertex welding.
//!
//! Render meshes split vertices along UV seams and hard edges, so one
//! geometric corner appears several times in the vertex buffer. Welding
//! collapses identical positions into one entry while remembering, for
//! every original vertex, which welded entry it became. The renderer uses
//! that table to map each drawn vertex back to its simulated particle.

use std::collections::HashMap;

use glam::Vec3;

use crate::mesh::TriangleMesh;

/// Result of welding a mesh's vertex buffer.
#[derive(Debug, Clone, Default)]
pub struct WeldedVertices {
    /// Unique positions in first-seen order, with the mesh scale applied.
    pub positions: Vec<Vec3>,
    /// For each original vertex, the index of its unique position.
    pub vertex_to_unique: Vec<u32>,
}

impl WeldedVertices {
    /// Number of unique positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the mesh had no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Bit-exact key for a position. `-0.0` and `0.0` weld together.
fn position_key(p: [f32; 3]) -> [u32; 3] {
    [
        (p[0] + 0.0).to_bits(),
        (p[1] + 0.0).to_bits(),
        (p[2] + 0.0).to_bits(),
    ]
}

/// Collapses geometrically identical vertices.
///
/// Matching is exact on the unscaled asset positions. The first occurrence
/// of a position decides its unique index; later duplicates map to it.
pub fn weld_vertices(mesh: &TriangleMesh) -> WeldedVertices {
    let n = mesh.vertex_count();
    let mut seen: HashMap<[u32; 3], u32> = HashMap::with_capacity(n);
    let mut welded = WeldedVertices {
        positions: Vec::new(),
        vertex_to_unique: Vec::with_capacity(n),
    };

    for i in 0..n {
        let key = position_key(mesh.position(i));
        let next = welded.positions.len() as u32;
        let id = *seen.entry(key).or_insert_with(|| {
            welded.positions.push(mesh.scaled_position(i));
            next
        });
        welded.vertex_to_unique.push(id);
    }

    tracing::debug!(
        vertices = n,
        unique = welded.positions.len(),
        "welded mesh vertices"
    );

    welded
}
