//! Integration tests for squishy-mesh.

use glam::Vec3;
use squishy_geometry::Containment;
use squishy_mesh::generators::{cube, prism, uv_sphere};
use squishy_mesh::{weld_vertices, ClosedSurface, TriangleMesh};

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        indices: vec![0, 1, 2],
        scale: Vec3::ONE,
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
}

#[test]
fn scaled_position_applies_scale() {
    let mesh = make_single_triangle().with_scale(Vec3::new(2.0, 3.0, 1.0));
    assert_eq!(mesh.scaled_position(2), Vec3::new(0.0, 3.0, 0.0));
}

#[test]
fn validate_ok() {
    let mesh = make_single_triangle();
    assert!(mesh.validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_nan() {
    let mut mesh = make_single_triangle();
    mesh.pos_x[1] = f32::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let indices = vec![0, 1, 2];
    let mesh = TriangleMesh::from_interleaved(&positions, &indices).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0]);
}

#[test]
fn bounds_of_cube() {
    let mesh = cube(2.0).with_scale(Vec3::new(1.0, 2.0, 1.0));
    let b = mesh.bounds().unwrap();
    assert_eq!(b.min, Vec3::splat(-1.0));
    assert_eq!(b.max, Vec3::splat(1.0));
    let s = mesh.scaled_bounds().unwrap();
    assert_eq!(s.max, Vec3::new(1.0, 2.0, 1.0));
}

#[test]
fn empty_mesh_has_no_bounds() {
    let mesh = TriangleMesh::with_capacity(0, 0);
    assert!(mesh.bounds().is_none());
}

// ─── Polygon Faces ────────────────────────────────────────────

#[test]
fn from_polygons_triangulates_quads() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
    let mesh = TriangleMesh::from_polygons(&positions, &[vec![0, 1, 2, 3]]).unwrap();
    assert_eq!(mesh.triangle_count(), 2);
}

#[test]
fn from_polygons_rejects_short_face() {
    let positions = [Vec3::ZERO, Vec3::X];
    assert!(TriangleMesh::from_polygons(&positions, &[vec![0, 1]]).is_err());
}

#[test]
fn from_polygons_rejects_out_of_range_face() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
    assert!(TriangleMesh::from_polygons(&positions, &[vec![0, 1, 7]]).is_err());
}

#[test]
fn from_polygons_rejects_collinear_face() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0];
    assert!(TriangleMesh::from_polygons(&positions, &[vec![0, 1, 2, 3]]).is_err());
}

#[test]
fn hexagonal_prism_triangle_count() {
    let mesh = prism(6, 1.0, 2.0).unwrap();
    // Two caps of 4 triangles + 6 quads of 2.
    assert_eq!(mesh.triangle_count(), 4 + 4 + 12);
    assert!(mesh.validate().is_ok());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn cube_counts() {
    let mesh = cube(1.0);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate().is_ok());
}

#[test]
fn uv_sphere_basic() {
    let mesh = uv_sphere(1.0, 8, 16);
    assert!(mesh.vertex_count() > 0);
    assert!(mesh.triangle_count() > 0);
    assert!(mesh.validate().is_ok());
}

#[test]
fn uv_sphere_radius() {
    let mesh = uv_sphere(2.5, 8, 16);
    for i in 0..mesh.vertex_count() {
        let dist = mesh.position_vec3(i).length();
        assert!((dist - 2.5).abs() < 1e-4, "Vertex {} at distance {}", i, dist);
    }
}

// ─── Welding ──────────────────────────────────────────────────

#[test]
fn cube_welds_to_eight_corners() {
    let mesh = cube(1.0);
    let welded = weld_vertices(&mesh);
    assert_eq!(welded.len(), 8);
    assert_eq!(welded.vertex_to_unique.len(), 24);
    assert!(welded.vertex_to_unique.iter().all(|&i| (i as usize) < 8));
}

#[test]
fn weld_first_seen_wins() {
    let mesh = TriangleMesh::from_interleaved(
        &[
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0,
        ],
        &[0, 1, 3],
    )
    .unwrap();
    let welded = weld_vertices(&mesh);
    assert_eq!(welded.vertex_to_unique, vec![0, 1, 0, 2]);
    assert_eq!(welded.positions[2], Vec3::Y);
}

#[test]
fn weld_treats_negative_zero_as_zero() {
    let mesh = TriangleMesh::from_interleaved(&[0.0, 0.0, 0.0, -0.0, 0.0, 0.0], &[]).unwrap();
    assert_eq!(weld_vertices(&mesh).len(), 1);
}

#[test]
fn weld_applies_scale() {
    let mesh = cube(2.0).with_scale(Vec3::splat(3.0));
    let welded = weld_vertices(&mesh);
    for p in welded.positions {
        assert_eq!(p.abs(), Vec3::splat(3.0));
    }
}

#[test]
fn sphere_seam_and_poles_weld() {
    let stacks = 8;
    let slices = 16;
    let mesh = uv_sphere(1.0, stacks, slices);
    let welded = weld_vertices(&mesh);
    // Interior rings keep `slices` unique points, poles collapse to one each.
    assert_eq!(welded.len(), (stacks - 1) * slices + 2);
}

// ─── Containment ──────────────────────────────────────────────

#[test]
fn unit_cube_center_inside() {
    let surface = ClosedSurface::from_mesh(&cube(1.0));
    assert!(surface.contains(Vec3::ZERO));
}

#[test]
fn unit_cube_far_points_outside() {
    let surface = ClosedSurface::from_mesh(&cube(1.0));
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        assert!(!surface.contains(axis * 1.0));
        assert!(!surface.contains(axis * -1.0));
    }
}

#[test]
fn cube_points_near_top_edge_inside() {
    let surface = ClosedSurface::from_mesh(&cube(2.0));
    for p in [
        Vec3::new(-0.98, 0.75, 0.9),
        Vec3::new(-0.4, 0.75, 0.9),
        Vec3::new(0.16, 0.95, 0.98),
    ] {
        assert!(surface.contains(p), "{p:?}");
    }
}

#[test]
fn scaled_surface_grows() {
    let surface = ClosedSurface::from_mesh(&cube(1.0).with_scale(Vec3::splat(4.0)));
    assert!(surface.contains(Vec3::new(1.5, 0.1, -0.3)));
}

#[test]
fn sphere_containment() {
    let surface = ClosedSurface::from_mesh(&uv_sphere(1.0, 12, 24));
    assert!(surface.contains(Vec3::new(0.1, 0.2, -0.1)));
    assert!(surface.contains(Vec3::new(0.5, 0.0, 0.3)));
    assert!(!surface.contains(Vec3::new(0.9, 0.9, 0.0)));
}

#[test]
fn prism_containment() {
    let surface = ClosedSurface::from_mesh(&prism(6, 1.0, 2.0).unwrap());
    assert!(surface.contains(Vec3::new(0.0, 0.5, 0.0)));
    assert!(!surface.contains(Vec3::new(0.0, 1.5, 0.0)));
}

#[test]
fn mesh_serialization_roundtrip() {
    let mesh = cube(1.0);
    let json = serde_json::to_string(&mesh).unwrap();
    let back: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(back.vertex_count(), 24);
    assert_eq!(back.indices, mesh.indices);
}
