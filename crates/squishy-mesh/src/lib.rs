//! # squishy-mesh
//!
//! The source surface a soft body is built from, stored in
//! Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Flat vertex positions (duplicates allowed, as render
//!   meshes split vertices along seams), triangle indices and a scale.
//! - [`WeldedVertices`]: Deduplicated positions plus the
//!   original-vertex → unique-vertex table.
//! - [`ClosedSurface`]: Parity-ray inside/outside test over the mesh.
//! - Procedural generators for closed test shapes (cube, UV sphere, prism).

pub mod generators;
pub mod mesh;
pub mod surface;
pub mod weld;

pub use mesh::TriangleMesh;
pub use surface::ClosedSurface;
pub use weld::{weld_vertices, WeldedVertices};
