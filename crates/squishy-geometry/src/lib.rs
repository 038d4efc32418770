//! # squishy-geometry
//!
//! Polygon and ray geometry used when seeding a lattice from a mesh.
//!
//! ## Key Items
//!
//! - [`point_in_triangle`]: strict barycentric containment
//! - [`signed_area`]: shoelace area; positive means counter-clockwise
//! - [`ear_clip`]: ear-clipping triangulation of a simple polygon
//! - [`ray_triangle`]: Möller–Trumbore ray/triangle intersection
//! - [`Containment`]: the inside/outside predicate the lattice builder consumes

pub mod containment;
pub mod ear_clip;
pub mod polygon;
pub mod ray;

pub use containment::{parity_contains, Containment};
pub use ear_clip::{ear_clip, ear_clip_indices};
pub use polygon::{point_in_triangle, signed_area, triangle_area};
pub use ray::ray_triangle;
