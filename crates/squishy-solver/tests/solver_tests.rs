//! Integration tests for squishy-solver.

use glam::Vec3;
use squishy_debug::{DebugDrawFlags, DrawQueue, TelemetryHook};
use squishy_lattice::{
    Lattice, LatticeConfig, Particle, ParticleKind, RestShape, Spring, SpringParams,
};
use squishy_mesh::generators::cube;
use squishy_mesh::TriangleMesh;
use squishy_solver::{
    AxisLock, BodyConfig, BodySet, ConstraintSolver, PhysicsBackend, SoftBody, SoftBodyConfig,
    SolverConfig, SolverStrategy, StepResult,
};
use squishy_telemetry::{EventKind, VecSink};
use squishy_types::ParticleId;

const DT: f32 = 1.0 / 60.0;

/// Two particles joined by one spring, with the rest shape captured at
/// `rest` separation along +X.
fn pair(rest: f32, b_at: Vec3, masses: [f32; 2], params: SpringParams) -> Lattice {
    let rest_positions = [Vec3::ZERO, Vec3::new(rest, 0.0, 0.0)];
    Lattice {
        particles: vec![
            Particle::new(ParticleId(0), Vec3::ZERO, masses[0], ParticleKind::Shell),
            Particle::new(ParticleId(1), b_at, masses[1], ParticleKind::Shell),
        ],
        springs: vec![Spring::new(ParticleId(0), ParticleId(1), rest, &params).unwrap()],
        rest_shape: RestShape::capture(&rest_positions, &masses),
        shell_count: 2,
        ..Default::default()
    }
}

fn solve_once(
    lattice: &Lattice,
    config: SolverConfig,
    velocities: [Vec3; 2],
) -> (BodySet, ConstraintSolver, StepResult) {
    let mut bodies = BodySet::from_particles(&lattice.particles, &BodyConfig::free_floating());
    bodies.set_velocity(0, velocities[0]);
    bodies.set_velocity(1, velocities[1]);
    let mut solver = ConstraintSolver::new(config.clone());
    solver.init(lattice, &config).unwrap();
    let result = solver.step(lattice, &mut bodies, DT).unwrap();
    (bodies, solver, result)
}

fn damped_params() -> SpringParams {
    SpringParams {
        stiffness: 700.0,
        damping: 50.0,
        max_stretch: 1.5,
    }
}

// ─── Spring Force Tests ───────────────────────────────────────

#[test]
fn pair_forces_cancel_for_equal_masses() {
    let lattice = pair(10.0, Vec3::new(7.0, 2.0, -1.0), [1.0, 1.0], damped_params());
    let (bodies, _, result) = solve_once(
        &lattice,
        SolverConfig::springs_only(),
        [Vec3::new(0.5, 0.0, 0.0), Vec3::new(-1.0, 0.3, 0.2)],
    );
    assert_eq!(result.springs_processed, 1);
    assert_eq!(result.clamped, 0);
    assert_ne!(bodies.force(1), Vec3::ZERO);
    assert_eq!(bodies.force(0) + bodies.force(1), Vec3::ZERO);
}

#[test]
fn shape_retention_forces_also_cancel() {
    let lattice = pair(10.0, Vec3::new(12.0, 1.0, 0.0), [2.0, 2.0], damped_params());
    let (bodies, _, _) = solve_once(&lattice, SolverConfig::default(), [Vec3::ZERO; 2]);
    let sum = bodies.force(0) + bodies.force(1);
    assert!(sum.length() < 1e-3, "net force {sum:?}");
}

#[test]
fn spring_at_rest_produces_no_force() {
    let lattice = pair(10.0, Vec3::new(10.0, 0.0, 0.0), [1.0, 1.0], damped_params());
    let (bodies, solver, result) = solve_once(&lattice, SolverConfig::default(), [Vec3::ZERO; 2]);
    assert_eq!(bodies.force(0), Vec3::ZERO);
    assert_eq!(bodies.force(1), Vec3::ZERO);
    assert!(solver.forces().iter().all(|f| *f == Vec3::ZERO));
    assert_eq!(result.elastic_energy, 0.0);
}

#[test]
fn compressed_spring_pushes_b_away() {
    let lattice = pair(10.0, Vec3::new(8.0, 0.0, 0.0), [1.0, 1.0], SpringParams::default());
    let (bodies, _, _) = solve_once(&lattice, SolverConfig::springs_only(), [Vec3::ZERO; 2]);
    // k·stretch = 700·2, split evenly.
    assert!((bodies.force(1).x - 700.0).abs() < 1e-3);
    assert!((bodies.force(0).x + 700.0).abs() < 1e-3);
}

#[test]
fn stretched_spring_pulls_b_back() {
    let lattice = pair(10.0, Vec3::new(12.0, 0.0, 0.0), [1.0, 1.0], SpringParams::default());
    let (bodies, _, _) = solve_once(&lattice, SolverConfig::springs_only(), [Vec3::ZERO; 2]);
    assert!(bodies.force(1).x < 0.0);
    assert!(bodies.force(0).x > 0.0);
}

#[test]
fn damping_opposes_approach() {
    let params = SpringParams {
        stiffness: 0.0,
        damping: 60.0,
        max_stretch: 1.5,
    };
    let lattice = pair(10.0, Vec3::new(10.0, 0.0, 0.0), [1.0, 1.0], params);
    let (bodies, _, _) = solve_once(
        &lattice,
        SolverConfig::springs_only(),
        [Vec3::ZERO, Vec3::new(-6.0, 0.0, 0.0)],
    );
    // Relative velocity −6·dt along dir, force on B = +c·6·dt, half of it.
    let expected = 0.5 * 60.0 * 6.0 * DT;
    assert!((bodies.force(1).x - expected).abs() < 1e-4);
}

#[test]
fn heavier_particle_takes_smaller_share() {
    let lattice = pair(10.0, Vec3::new(8.0, 0.0, 0.0), [3.0, 1.0], SpringParams::default());
    let (bodies, _, _) = solve_once(&lattice, SolverConfig::springs_only(), [Vec3::ZERO; 2]);
    let total = 1400.0;
    assert!((bodies.force(1).x - total * 0.75).abs() < 1e-2);
    assert!((bodies.force(0).x + total * 0.25).abs() < 1e-2);
}

#[test]
fn unequal_mass_split_leaves_net_force() {
    // B gets r = mA/(mA+mB), A gets 1 − r, so the pair sum is F·(2r − 1).
    let lattice = pair(10.0, Vec3::new(8.0, 0.0, 0.0), [3.0, 1.0], SpringParams::default());
    let (bodies, _, _) = solve_once(&lattice, SolverConfig::springs_only(), [Vec3::ZERO; 2]);
    let net = bodies.force(0) + bodies.force(1);
    assert!((net.x - 1400.0 * (2.0 * 0.75 - 1.0)).abs() < 1e-2);
    assert_eq!(net.y, 0.0);
    assert_eq!(net.z, 0.0);
}

// ─── Stretch Clamp Tests ──────────────────────────────────────

#[test]
fn stretch_clamp_engages_beyond_max() {
    let lattice = pair(10.0, Vec3::new(16.0, 0.0, 0.0), [1.0, 1.0], SpringParams::default());
    let (bodies, solver, result) =
        solve_once(&lattice, SolverConfig::springs_only(), [Vec3::ZERO; 2]);
    assert_eq!(result.clamped, 1);
    // Bound is 15; B is pulled back by the 1-unit overshoot.
    assert!((bodies.velocity(1) - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    assert_eq!(bodies.velocity(0), Vec3::ZERO);
    assert!((solver.corrections()[1].x + 1.0).abs() < 1e-5);
}

#[test]
fn stretch_clamp_idle_below_max() {
    let lattice = pair(10.0, Vec3::new(14.9, 0.0, 0.0), [1.0, 1.0], SpringParams::default());
    let (bodies, _, result) = solve_once(&lattice, SolverConfig::springs_only(), [Vec3::ZERO; 2]);
    assert_eq!(result.clamped, 0);
    assert_eq!(bodies.velocity(1), Vec3::ZERO);
}

// ─── Degenerate Springs ───────────────────────────────────────

#[test]
fn coincident_particles_are_skipped() {
    let lattice = pair(10.0, Vec3::ZERO, [1.0, 1.0], SpringParams::default());
    let (bodies, _, result) = solve_once(&lattice, SolverConfig::default(), [Vec3::ZERO; 2]);
    assert_eq!(result.springs_skipped, 1);
    assert_eq!(result.springs_processed, 0);
    assert!(bodies.force(0).is_finite() && bodies.force(1).is_finite());
    assert_eq!(bodies.force(1), Vec3::ZERO);
}

#[test]
fn massless_pair_is_skipped() {
    let lattice = pair(10.0, Vec3::new(8.0, 0.0, 0.0), [0.0, 0.0], SpringParams::default());
    let (_, _, result) = solve_once(&lattice, SolverConfig::springs_only(), [Vec3::ZERO; 2]);
    assert_eq!(result.springs_skipped, 1);
}

#[test]
fn uninitialized_solver_errors() {
    let lattice = pair(10.0, Vec3::new(8.0, 0.0, 0.0), [1.0, 1.0], SpringParams::default());
    let mut bodies = BodySet::from_particles(&lattice.particles, &BodyConfig::free_floating());
    let mut solver = ConstraintSolver::new(SolverConfig::default());
    assert!(solver.step(&lattice, &mut bodies, DT).is_err());
}

#[test]
fn backend_size_mismatch_errors() {
    let lattice = pair(10.0, Vec3::new(8.0, 0.0, 0.0), [1.0, 1.0], SpringParams::default());
    let mut solver = ConstraintSolver::new(SolverConfig::default());
    solver.init(&lattice, &SolverConfig::default()).unwrap();
    let mut bodies = BodySet::from_particles(&lattice.particles[..1], &BodyConfig::free_floating());
    assert!(solver.step(&lattice, &mut bodies, DT).is_err());
}

// ─── Order Independence ───────────────────────────────────────

fn perturbed_cube_lattice() -> Lattice {
    let mut lattice = squishy_lattice::LatticeBuilder::new(LatticeConfig::with_radius(0.05))
        .build(&cube(1.0))
        .unwrap();
    for (i, p) in lattice.particles.iter_mut().enumerate() {
        let f = i as f32;
        p.position += Vec3::new((f * 1.3).sin(), (f * 0.7).cos(), (f * 2.1).sin()) * 0.02;
        p.velocity = Vec3::new((f * 0.3).cos(), (f * 1.1).sin(), 0.0) * 0.1;
    }
    lattice
}

#[test]
fn spring_order_does_not_change_summed_forces() {
    let forward = perturbed_cube_lattice();
    let mut reversed = forward.clone();
    reversed.springs.reverse();

    let config = SolverConfig {
        damping: 10.0,
        ..SolverConfig::default()
    };
    let run = |lattice: &Lattice| {
        let mut bodies = BodySet::from_particles(&lattice.particles, &BodyConfig::free_floating());
        let mut solver = ConstraintSolver::new(config.clone());
        solver.init(lattice, &config).unwrap();
        solver.step(lattice, &mut bodies, DT).unwrap();
        (0..bodies.count).map(|i| bodies.force(i)).collect::<Vec<_>>()
    };

    let a = run(&forward);
    let b = run(&reversed);
    for (fa, fb) in a.iter().zip(&b) {
        assert!((*fa - *fb).length() <= 1e-3 * (1.0 + fa.length()), "{fa:?} vs {fb:?}");
    }
}

#[test]
fn lattice_net_force_vanishes() {
    let lattice = perturbed_cube_lattice();
    let mut bodies = BodySet::from_particles(&lattice.particles, &BodyConfig::free_floating());
    let mut solver = ConstraintSolver::new(SolverConfig::default());
    solver.init(&lattice, &SolverConfig::default()).unwrap();
    let result = solver.step(&lattice, &mut bodies, DT).unwrap();
    assert_eq!(result.springs_processed as usize, lattice.spring_count());

    let net: Vec3 = (0..bodies.count).map(|i| bodies.force(i)).sum();
    let scale: f32 = (0..bodies.count).map(|i| bodies.force(i).length()).sum();
    assert!(net.length() <= 1e-4 * scale.max(1.0), "net {net:?}");
}

// ─── BodySet Tests ────────────────────────────────────────────

fn single_body(config: &BodyConfig) -> BodySet {
    let p = Particle::new(ParticleId(0), Vec3::ZERO, 2.0, ParticleKind::Fill);
    BodySet::from_particles(&[p], config)
}

#[test]
fn gravity_accelerates() {
    let config = BodyConfig {
        linear_damping: 0.0,
        ..Default::default()
    };
    let mut bodies = single_body(&config);
    bodies.integrate(DT);
    assert!((bodies.velocity(0).y + 9.81 * DT).abs() < 1e-6);
    assert!(bodies.position(0).y < 0.0);
}

#[test]
fn gravity_toggle() {
    let config = BodyConfig {
        use_gravity: false,
        ..Default::default()
    };
    let mut bodies = single_body(&config);
    bodies.integrate(DT);
    assert_eq!(bodies.position(0), Vec3::ZERO);
}

#[test]
fn forces_accumulate_then_clear() {
    let mut bodies = single_body(&BodyConfig::free_floating());
    bodies.apply_force(0, Vec3::new(1.0, 0.0, 0.0));
    bodies.apply_force(0, Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(bodies.force(0), Vec3::new(4.0, 0.0, 0.0));
    bodies.integrate(DT);
    // a = F/m = 2
    assert!((bodies.velocity(0).x - 2.0 * DT).abs() < 1e-6);
    assert_eq!(bodies.force(0), Vec3::ZERO);
}

#[test]
fn linear_damping_slows() {
    let config = BodyConfig {
        use_gravity: false,
        linear_damping: 3.0,
        ..Default::default()
    };
    let mut bodies = single_body(&config);
    bodies.set_velocity(0, Vec3::X);
    bodies.integrate(DT);
    assert!(bodies.velocity(0).x < 1.0 && bodies.velocity(0).x > 0.9);
}

#[test]
fn axis_lock_freezes_axis() {
    let config = BodyConfig {
        linear_damping: 0.0,
        locking: AxisLock::Y,
        ..Default::default()
    };
    let mut bodies = single_body(&config);
    bodies.set_velocity(0, Vec3::new(1.0, 5.0, 0.0));
    for _ in 0..10 {
        bodies.integrate(DT);
    }
    assert_eq!(bodies.position(0).y, 0.0);
    assert!(bodies.position(0).x > 0.0);
}

#[test]
fn mass_override_and_restore() {
    let mut bodies = single_body(&BodyConfig::default());
    assert_eq!(bodies.mass(0), 2.0);
    bodies.configure_bodies(&BodyConfig {
        mass_override: Some(5.0),
        ..Default::default()
    });
    assert_eq!(bodies.mass(0), 5.0);
    bodies.configure_bodies(&BodyConfig::default());
    assert_eq!(bodies.mass(0), 2.0);
}

#[test]
fn ground_plane_stops_fall() {
    let config = BodyConfig {
        linear_damping: 0.0,
        ..Default::default()
    };
    let mut bodies = single_body(&config).with_ground(-0.1);
    bodies.set_velocity(0, Vec3::new(2.0, 0.0, 0.0));
    for _ in 0..60 {
        bodies.integrate(DT);
    }
    assert_eq!(bodies.position(0).y, -0.1);
    assert!(bodies.velocity(0).y <= 0.0 && bodies.velocity(0).y > -1.0);
    assert!(bodies.velocity(0).x < 0.1);
}

#[test]
fn snapshot_restore() {
    let mut bodies = single_body(&BodyConfig::default());
    let snap = bodies.snapshot(0, 0.0);
    for _ in 0..5 {
        bodies.integrate(DT);
    }
    assert_ne!(bodies.position(0), Vec3::ZERO);
    assert!(bodies.restore(&snap));
    assert_eq!(bodies.position(0), Vec3::ZERO);
    assert_eq!(bodies.velocity(0), Vec3::ZERO);
}

// ─── SoftBody Tests ───────────────────────────────────────────

fn cube_body(config: SoftBodyConfig) -> SoftBody<BodySet> {
    let mut body = SoftBody::new(BodySet::new(), config).unwrap();
    body.rebuild(&cube(1.0), Vec3::new(0.0, 5.0, 0.0)).unwrap();
    body
}

fn small_cube_config() -> SoftBodyConfig {
    SoftBodyConfig {
        lattice: LatticeConfig::with_radius(0.05),
        solver: SolverConfig::springs_only(),
        ..Default::default()
    }
}

#[test]
fn rebuild_exposes_render_tables() {
    let body = cube_body(small_cube_config());
    assert_eq!(body.shell_count(), 8);
    assert_eq!(body.vertex_particle_ids().len(), 24);
    assert_eq!(body.backend().particle_count(), body.lattice().particle_count());
    assert_eq!(body.render_positions().len(), 8);
    assert_eq!(body.origin(), Vec3::new(0.0, 5.0, 0.0));
    // Corners sit half an edge from the centre.
    for p in body.render_positions() {
        assert!((p.abs() - Vec3::splat(0.5)).length() < 1e-5);
    }
}

#[test]
fn rebuild_replaces_lattice() {
    let mut body = cube_body(small_cube_config());
    let before = body.lattice().particle_count();
    body.rebuild(&cube(2.0), Vec3::ZERO).unwrap();
    assert_eq!(body.shell_count(), 8);
    assert_eq!(body.backend().particle_count(), body.lattice().particle_count());
    assert_eq!(before, body.lattice().particle_count());
}

#[test]
fn falling_body_stays_finite_and_recentres() {
    let mut config = small_cube_config();
    config.body.linear_damping = 0.0;
    let mut body = cube_body(config);
    let mut queue = DrawQueue::new();

    for _ in 0..60 {
        body.advance(DT).unwrap();
        body.frame_update(&mut queue);
    }
    assert_eq!(body.step_count(), 60);
    assert!(body.particle_positions().iter().all(|p| p.is_finite()));
    // Free fall for one second from y = 5.
    assert!(body.origin().y < 0.5);

    let mean = body.particle_positions().iter().copied().sum::<Vec3>()
        / body.lattice().particle_count() as f32;
    assert!((body.origin() - mean).length() < 1e-4);
}

#[test]
fn net_force_vanishes_on_host_step() {
    let mut config = small_cube_config();
    config.body = BodyConfig::free_floating();
    config.solver.damping = 20.0;
    let mut body = cube_body(config);
    for i in 0..body.backend().particle_count() {
        let f = i as f32;
        let v = Vec3::new(f.sin(), f.cos(), 0.0);
        body.backend_mut().set_velocity(i, v);
    }
    body.fixed_update(DT).unwrap();
    let bodies = body.backend();
    assert!((0..bodies.count).any(|i| bodies.force(i) != Vec3::ZERO));
    let net: Vec3 = (0..bodies.count).map(|i| bodies.force(i)).sum();
    assert!(net.length() < 1e-3, "net {net:?}");
}

#[test]
fn apply_configuration_broadcasts() {
    let mut body = cube_body(small_cube_config());
    let particles = body.lattice().particle_count();

    let mut config = body.config().clone();
    config.solver.stiffness = 42.0;
    config.solver.damping = 3.0;
    config.body.mass_override = Some(7.0);
    config.lattice.particle_radius = 0.2;
    body.apply_configuration(config).unwrap();

    assert!(body.lattice().springs.iter().all(|s| s.stiffness == 42.0 && s.damping == 3.0));
    assert!((0..particles).all(|i| body.backend().mass(i) == 7.0));
    // Lattice parameters wait for the next rebuild.
    assert_eq!(body.lattice().particle_count(), particles);
    assert_eq!(body.config().lattice.particle_radius, 0.2);
}

#[test]
fn apply_configuration_rejects_invalid() {
    let mut body = cube_body(small_cube_config());
    let mut config = body.config().clone();
    config.solver.max_stretch = 0.5;
    assert!(body.apply_configuration(config).is_err());
    assert_eq!(body.config().solver.max_stretch, 1.5);
}

#[test]
fn debug_flags_select_overlays() {
    let mut config = small_cube_config();
    config.debug_flags = DebugDrawFlags::SPRINGS;
    let mut body = cube_body(config);
    let mut queue = DrawQueue::new();
    body.frame_update(&mut queue);
    assert_eq!(queue.len(), body.lattice().spring_count());

    let mut config = body.config().clone();
    config.debug_flags = DebugDrawFlags::SHELL_PARTICLES | DebugDrawFlags::FILL_PARTICLES;
    body.apply_configuration(config).unwrap();
    queue.drain_frame(DT);
    body.frame_update(&mut queue);
    assert_eq!(queue.len(), body.lattice().particle_count());
    assert_eq!(queue.drain_frame(DT).len(), body.lattice().particle_count());
    assert!(queue.is_empty());
}

#[test]
fn telemetry_reports_steps() {
    let mut body = SoftBody::new(BodySet::new(), small_cube_config()).unwrap();
    let sink = VecSink::new();
    body.bus_mut().add_sink(Box::new(sink.clone()));
    body.add_hook(Box::new(TelemetryHook::new()));
    body.rebuild(&cube(1.0), Vec3::ZERO).unwrap();
    body.advance(DT).unwrap();
    body.advance(DT).unwrap();
    body.finish();

    let events = sink.events();
    assert!(matches!(events[0].kind, EventKind::LatticeBuilt { shell_particles: 8, .. }));
    let begins = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::StepBegin { .. }))
        .count();
    assert_eq!(begins, 2);
    assert!(events.iter().any(|e| matches!(e.kind, EventKind::Energy { .. })));
    assert_eq!(events.last().map(|e| e.step), Some(1));
}

#[test]
fn degenerate_lattice_skips_steps() {
    let mut body = SoftBody::new(BodySet::new(), SoftBodyConfig::default()).unwrap();
    body.rebuild(&TriangleMesh::with_capacity(0, 0), Vec3::ZERO).unwrap();
    assert!(body.lattice().is_degenerate());
    let result = body.advance(DT).unwrap();
    assert_eq!(result.springs_processed, 0);
    assert_eq!(body.step_count(), 1);
    assert!(body.render_positions().is_empty());
}

#[test]
fn host_snapshot_matches_backend() {
    let mut body = cube_body(small_cube_config());
    body.advance(DT).unwrap();
    let snap = body.snapshot();
    assert_eq!(snap.step, 1);
    assert_eq!(snap.particle_count, body.lattice().particle_count());
    assert_eq!(snap.position(3), body.backend().position(3));
}

#[test]
fn solver_name() {
    let body = cube_body(small_cube_config());
    assert_eq!(body.solver_name(), "spring_constraints");
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_values() {
    let c = SolverConfig::default();
    assert_eq!(c.stiffness, 700.0);
    assert_eq!(c.damping, 0.0);
    assert_eq!(c.max_stretch, 1.5);
    assert_eq!(c.shape_retention_stiffness, 4000.0);
    assert_eq!(BodyConfig::default().linear_damping, 3.0);
    assert!(SoftBodyConfig::default().validate().is_ok());
}

#[test]
fn partial_scene_config_fills_defaults() {
    let json = r#"{ "solver": { "stiffness": 100.0 }, "body": { "use_gravity": false } }"#;
    let config: SoftBodyConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.solver.stiffness, 100.0);
    assert_eq!(config.solver.max_stretch, 1.5);
    assert!(!config.body.use_gravity);
    assert_eq!(config.lattice.particle_radius, 2.0);
}

#[test]
fn invalid_body_config() {
    let bad = BodyConfig {
        mass_override: Some(-1.0),
        ..Default::default()
    };
    assert!(bad.validate().is_err());
    assert!(SoftBody::new(
        BodySet::new(),
        SoftBodyConfig {
            body: bad,
            ..Default::default()
        }
    )
    .is_err());
}
