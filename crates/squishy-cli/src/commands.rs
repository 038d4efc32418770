//! CLI command implementations.

use squishy_bench::metrics::BenchmarkMetrics;
use squishy_bench::runner::BenchmarkRunner;
use squishy_bench::scenarios::{Scenario, ScenarioKind};
use squishy_debug::StateSnapshot;
use squishy_lattice::{LatticeBuilder, LatticeConfig};
use squishy_oscillator::{Oscillator, OscillatorParams};
use squishy_solver::{BodySet, SoftBody};
use squishy_telemetry::VecSink;

use crate::scene::{MeshSource, Scene};
use crate::MeshKind;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Run a simulation from a scene file, or the default scene.
pub fn simulate(
    scene_path: Option<&str>,
    steps: Option<u32>,
    snapshot_path: Option<&str>,
    print_events: bool,
) -> CliResult {
    let mut scene = match scene_path {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };
    if let Some(n) = steps {
        scene.steps = n;
    }
    tracing::info!(steps = scene.steps, dt = scene.dt, "starting simulation");

    println!("squishy simulation");
    println!("──────────────────");
    println!("Scene: {}", scene_path.unwrap_or("<default>"));

    let backend = match scene.ground {
        Some(y) => BodySet::new().with_ground(y),
        None => BodySet::new(),
    };
    let mut body = SoftBody::new(backend, scene.config.clone())?;
    let sink = VecSink::new();
    if print_events {
        body.bus_mut().add_sink(Box::new(sink.clone()));
    }
    body.rebuild(&scene.build_mesh()?, scene.origin())?;

    let lattice = body.lattice();
    println!(
        "Lattice: {} shell + {} fill particles, {} springs",
        lattice.shell_count,
        lattice.fill_count(),
        lattice.spring_count()
    );
    println!();

    let report_every = (scene.steps / 10).max(1);
    let mut clamps = 0u64;
    for step in 1..=scene.steps {
        let result = body.advance(scene.dt)?;
        body.update_center();
        clamps += result.clamped as u64;
        if step % report_every == 0 || step == scene.steps {
            let center = body.origin();
            println!(
                "step {step:>5}  t={:.3}s  center=({:.3}, {:.3}, {:.3})  KE={:.4e}  elastic={:.4e}",
                body.sim_time(),
                center.x,
                center.y,
                center.z,
                body.kinetic_energy(),
                result.elastic_energy,
            );
        }
    }
    body.finish();
    println!();
    println!("Stretch clamps: {clamps}");

    if let Some(path) = snapshot_path {
        std::fs::write(path, body.snapshot().to_bytes()?)?;
        println!("Snapshot written to: {path}");
    }

    if print_events {
        for event in sink.events() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    steps: Option<u32>,
    output_path: Option<&str>,
    json: bool,
) -> CliResult {
    println!("squishy benchmark suite");
    println!("═══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                return Err(format!(
                    "Unknown scenario: '{scenario_name}'. Available: {}, all",
                    available.join(", ")
                )
                .into());
            }
        }
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind)?;
        if let Some(n) = steps {
            scenario = scenario.with_timesteps(n);
        }

        println!("Running: {} ({} steps)", kind.name(), scenario.timesteps);

        let metrics =
            BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!(
            "  Lattice:       {} particles, {} springs",
            metrics.particle_count, metrics.spring_count
        );
        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Clamps:        {}", metrics.total_clamps);
        println!();

        all_metrics.push(metrics);
    }

    let report = if json {
        BenchmarkMetrics::to_json(&all_metrics)?
    } else {
        BenchmarkMetrics::to_csv(&all_metrics)
    };

    if let Some(path) = output_path {
        std::fs::write(path, &report)?;
        println!("Results written to: {path}");
    } else {
        println!("{}", report);
    }

    Ok(())
}

/// Build a lattice from a procedural mesh and print its statistics.
pub fn lattice(kind: MeshKind, size: f32, radius: f32, connection: Option<f32>) -> CliResult {
    let source = match kind {
        MeshKind::Cube => MeshSource::Cube { size },
        MeshKind::Sphere => MeshSource::Sphere {
            radius: size,
            stacks: 8,
            slices: 12,
        },
        MeshKind::Prism => MeshSource::Prism {
            sides: 6,
            radius: size,
            height: size,
        },
    };
    let mesh = source.build()?;
    let config = LatticeConfig {
        connection_distance: connection,
        ..LatticeConfig::with_radius(radius)
    };
    let lattice = LatticeBuilder::new(config).build(&mesh)?;

    println!("squishy lattice");
    println!("───────────────");
    println!(
        "Mesh:                {kind:?} ({} verts, {} tris)",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    println!("Shell particles:     {}", lattice.shell_count);
    println!("Fill particles:      {}", lattice.fill_count());
    println!("Springs:             {}", lattice.spring_count());
    println!(
        "Grid step:           ({:.4}, {:.4}, {:.4})",
        lattice.grid_step.x, lattice.grid_step.y, lattice.grid_step.z
    );
    println!("Connection distance: {:.4}", lattice.connection_distance);

    let degrees = lattice.degrees();
    if !degrees.is_empty() {
        let min = degrees.iter().copied().min().unwrap_or(0);
        let max = degrees.iter().copied().max().unwrap_or(0);
        let mean = degrees.iter().map(|&d| d as f64).sum::<f64>() / degrees.len() as f64;
        let isolated = degrees.iter().filter(|&&d| d == 0).count();
        println!("Degree:              min {min}, max {max}, mean {mean:.2}");
        println!("Isolated particles:  {isolated}");
    }

    Ok(())
}

/// Print a sampled oscillator curve from `from` to `to`.
#[allow(clippy::too_many_arguments)]
pub fn oscillate(
    from: f64,
    to: f64,
    mass: f64,
    stiffness: f64,
    damping: f64,
    duration: f64,
    samples: u32,
) -> CliResult {
    let params = OscillatorParams::new(mass, stiffness, damping);
    let mut oscillator = Oscillator::new(params, from)?;
    oscillator.retarget(to, 0.0);

    println!("squishy oscillator");
    println!("──────────────────");
    println!(
        "m={mass} k={stiffness} c={damping}  ζ={:.3} ({:?})",
        params.damping_ratio(),
        params.regime()
    );
    println!();
    println!("{:>8}  {:>12}  {:>12}", "t", "value", "velocity");

    let samples = samples.max(1);
    for i in 0..=samples {
        let t = duration * i as f64 / samples as f64;
        let (value, velocity) = oscillator.sample(t);
        println!("{t:>8.4}  {value:>12.6}  {velocity:>12.6}");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> CliResult {
    println!("squishy snapshot inspector");
    println!("──────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot =
        StateSnapshot::from_bytes(&data).map_err(|e| format!("Failed to read snapshot: {e}"))?;

    println!("Step:         {}", snapshot.step);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Particles:    {}", snapshot.particle_count);

    if snapshot.particle_count > 0 {
        let ys = (0..snapshot.particle_count).map(|i| snapshot.position(i).y);
        let min_y = ys.clone().fold(f32::INFINITY, f32::min);
        let max_y = ys.fold(f32::NEG_INFINITY, f32::max);
        let max_speed = (0..snapshot.particle_count)
            .map(|i| snapshot.velocity(i).length())
            .fold(0.0f32, f32::max);
        println!("Y range:      [{:.4}, {:.4}]", min_y, max_y);
        println!("Max speed:    {:.4}", max_speed);
    }

    Ok(())
}
