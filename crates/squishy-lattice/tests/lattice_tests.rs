//! Integration tests for squishy-lattice.

use glam::Vec3;
use squishy_lattice::{LatticeBuilder, LatticeConfig, ParticleKind, SpringParams};
use squishy_mesh::generators::{cube, uv_sphere};
use squishy_mesh::{weld_vertices, TriangleMesh};
use squishy_types::ParticleId;

fn unit_cube_builder() -> LatticeBuilder {
    LatticeBuilder::new(LatticeConfig::with_radius(0.05))
}

// ─── Shell Tests ──────────────────────────────────────────────

#[test]
fn cube_shell_is_welded_corners() {
    let mesh = cube(1.0);
    let lattice = unit_cube_builder().build(&mesh).unwrap();

    assert_eq!(lattice.shell_count, 8);
    assert_eq!(lattice.vertex_to_particle.len(), 24);
    for (v, id) in lattice.vertex_to_particle.iter().enumerate() {
        let p = lattice.particle(*id).unwrap();
        assert_eq!(p.kind, ParticleKind::Shell);
        assert_eq!(p.position, mesh.scaled_position(v));
    }
}

#[test]
fn shell_particles_come_first() {
    let lattice = unit_cube_builder().build(&cube(1.0)).unwrap();
    assert!(lattice.shell_particles().iter().all(|p| p.is_shell()));
    assert!(lattice.fill_particles().iter().all(|p| p.kind == ParticleKind::Fill));
    for (i, p) in lattice.particles.iter().enumerate() {
        assert_eq!(p.id, ParticleId::from(i));
        assert_eq!(lattice.kind(p.id), p.kind);
    }
}

// ─── Fill Tests ───────────────────────────────────────────────

#[test]
fn cube_fill_is_five_cubed_grid() {
    let lattice = unit_cube_builder().build(&cube(1.0)).unwrap();
    // step = max(1/6, 0.05·2.5) = 1/6 → five samples per axis inside.
    assert_eq!(lattice.fill_count(), 125);
    assert!((lattice.grid_step.x - 1.0 / 6.0).abs() < 1e-6);
}

#[test]
fn large_radius_leaves_single_center_fill() {
    let lattice = LatticeBuilder::new(LatticeConfig::with_radius(2.0))
        .build(&cube(10.0))
        .unwrap();
    // step = max(10/6, 5) = 5 → only the centre sample.
    assert_eq!(lattice.fill_count(), 1);
    assert!(lattice.fill_particles()[0].position.length() < 1e-5);
}

#[test]
fn fill_respects_min_spacing() {
    let config = LatticeConfig::with_radius(0.4);
    let min_spacing = config.min_spacing();
    let lattice = LatticeBuilder::new(config).build(&uv_sphere(5.0, 8, 12)).unwrap();
    assert!(lattice.fill_count() > 0);

    for f in lattice.fill_particles() {
        for p in &lattice.particles {
            if p.id == f.id {
                continue;
            }
            assert!(f.position.distance(p.position) > min_spacing);
        }
    }
}

#[test]
fn sphere_fill_is_inside() {
    let lattice = LatticeBuilder::new(LatticeConfig::with_radius(0.4))
        .build(&uv_sphere(5.0, 8, 12))
        .unwrap();
    assert_eq!(lattice.shell_count, 7 * 12 + 2);
    for p in lattice.fill_particles() {
        assert!(p.position.length() < 5.0, "fill particle at {:?}", p.position);
    }
}

#[test]
fn rejecting_predicate_leaves_shell_only() {
    let mesh = cube(1.0);
    let welded = weld_vertices(&mesh);
    let lattice = unit_cube_builder()
        .build_from_parts(&welded, mesh.bounds(), mesh.scale, &|_p: Vec3| false)
        .unwrap();
    assert_eq!(lattice.fill_count(), 0);
    assert_eq!(lattice.shell_count, 8);
}

#[test]
fn custom_predicate_shapes_fill() {
    let mesh = cube(1.0);
    let welded = weld_vertices(&mesh);
    let ball = |p: Vec3| p.length() < 0.2;
    let lattice = unit_cube_builder()
        .build_from_parts(&welded, mesh.bounds(), mesh.scale, &ball)
        .unwrap();
    assert!(lattice.fill_count() > 0);
    assert!(lattice.fill_particles().iter().all(|p| p.position.length() < 0.2));
}

// ─── Connection Tests ─────────────────────────────────────────

#[test]
fn cube_springs_are_axis_and_face_diagonal_links() {
    let lattice = unit_cube_builder().build(&cube(1.0)).unwrap();
    // 5×5×5 grid: 300 axis edges + 480 face diagonals. The corners sit a
    // body diagonal away from the nearest fill sample and stay unlinked.
    assert_eq!(lattice.spring_count(), 780);
    let degree = lattice.degrees();
    assert!(degree[..8].iter().all(|&d| d == 0));
    assert!((lattice.connection_distance - (1.0 / 6.0) * 1.415).abs() < 1e-5);
}

#[test]
fn springs_are_unique_sorted_and_measured() {
    let lattice = LatticeBuilder::new(LatticeConfig::with_radius(0.4))
        .build(&uv_sphere(5.0, 8, 12))
        .unwrap();
    assert!(!lattice.is_degenerate());

    let mut prev = None;
    for s in &lattice.springs {
        assert!(s.a < s.b);
        let key = (s.a, s.b);
        if let Some(p) = prev {
            assert!(key > p, "springs out of order or duplicated");
        }
        prev = Some(key);

        let pa = lattice.particles[s.a.index()].position;
        let pb = lattice.particles[s.b.index()].position;
        assert!((pa.distance(pb) - s.rest_length).abs() < 1e-5);
        assert!(s.rest_length < lattice.connection_distance);
    }
}

#[test]
fn connection_override_links_corners() {
    let config = LatticeConfig {
        connection_distance: Some(0.3),
        ..LatticeConfig::with_radius(0.05)
    };
    let lattice = LatticeBuilder::new(config).build(&cube(1.0)).unwrap();
    assert_eq!(lattice.connection_distance, 0.3);
    let degree = lattice.degrees();
    assert!(degree[..8].iter().all(|&d| d == 1));
}

#[test]
fn spring_params_are_copied_and_broadcast() {
    let params = SpringParams {
        stiffness: 123.0,
        damping: 4.0,
        max_stretch: 2.0,
    };
    let mut lattice = unit_cube_builder()
        .with_spring_params(params)
        .build(&cube(1.0))
        .unwrap();
    assert!(lattice.springs.iter().all(|s| s.stiffness == 123.0 && s.damping == 4.0));

    lattice.set_spring_params(&SpringParams::default());
    assert!(lattice.springs.iter().all(|s| s.stiffness == 700.0 && s.max_stretch == 1.5));
}

// ─── Rest Shape Tests ─────────────────────────────────────────

#[test]
fn rest_offsets_sum_to_zero() {
    let lattice = LatticeBuilder::new(LatticeConfig::with_radius(0.4))
        .build(&uv_sphere(5.0, 8, 12))
        .unwrap();
    assert_eq!(lattice.rest_shape.len(), lattice.particle_count());
    let sum: Vec3 = lattice.rest_shape.offsets.iter().copied().sum();
    assert!(sum.length() < 1e-3, "offset sum {sum:?}");
    for (p, off) in lattice.particles.iter().zip(&lattice.rest_shape.offsets) {
        assert!((lattice.rest_shape.center + *off - p.position).length() < 1e-5);
    }
}

// ─── Scale Tests ──────────────────────────────────────────────

#[test]
fn scale_stretches_lattice() {
    let base = unit_cube_builder().build(&cube(1.0)).unwrap();
    let scaled = unit_cube_builder()
        .build(&cube(1.0).with_scale(Vec3::splat(2.0)))
        .unwrap();

    assert_eq!(scaled.particle_count(), base.particle_count());
    assert_eq!(scaled.spring_count(), base.spring_count());
    assert!((scaled.connection_distance - 2.0 * base.connection_distance).abs() < 1e-5);
    for (a, b) in base.particles.iter().zip(&scaled.particles) {
        assert!((a.position * 2.0 - b.position).length() < 1e-5);
    }
}

// ─── Degenerate Input ─────────────────────────────────────────

#[test]
fn empty_mesh_gives_empty_lattice() {
    let lattice = unit_cube_builder().build(&TriangleMesh::with_capacity(0, 0)).unwrap();
    assert_eq!(lattice.particle_count(), 0);
    assert!(lattice.is_degenerate());
}

#[test]
fn flat_mesh_collapses_to_one_particle() {
    let mesh = TriangleMesh::from_interleaved(
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        &[0, 1, 2],
    )
    .unwrap();
    let lattice = unit_cube_builder().build(&mesh).unwrap();
    assert_eq!(lattice.particle_count(), 1);
    assert_eq!(lattice.spring_count(), 0);
    assert_eq!(lattice.vertex_to_particle, vec![ParticleId(0); 3]);
}

#[test]
fn invalid_mesh_is_an_error() {
    let mut mesh = cube(1.0);
    mesh.indices[0] = 999;
    assert!(unit_cube_builder().build(&mesh).is_err());
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_validation() {
    assert!(LatticeConfig::default().validate().is_ok());
    assert!(LatticeConfig::with_radius(-1.0).validate().is_err());
    let bad = LatticeConfig {
        connection_distance: Some(0.0),
        ..Default::default()
    };
    assert!(bad.validate().is_err());
    assert!(LatticeBuilder::new(LatticeConfig::with_radius(0.0))
        .build(&cube(1.0))
        .is_err());
}

#[test]
fn grid_step_formula() {
    let config = LatticeConfig::with_radius(2.0);
    assert_eq!(config.grid_step(60.0), 10.0);
    assert_eq!(config.grid_step(6.0), 5.0);
    assert_eq!(LatticeConfig::fine(0.1).grid_step(10.0), 1.0);
}

#[test]
fn config_serialization() {
    let config = LatticeConfig {
        connection_distance: Some(1.5),
        ..LatticeConfig::fine(0.25)
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: LatticeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.connection_distance, Some(1.5));
    assert_eq!(back.step_divisor, 10.0);
}
