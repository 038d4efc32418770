//! Benchmark runner: executes scenarios on the built-in backend and
//! collects metrics.

use std::time::Instant;

use squishy_solver::{BodySet, PhysicsBackend, SoftBody};
use squishy_types::SquishyResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario) -> SquishyResult<BenchmarkMetrics> {
        let backend = match scenario.ground {
            Some(y) => BodySet::new().with_ground(y),
            None => BodySet::new(),
        };
        let mut body = SoftBody::new(backend, scenario.config.clone())?;
        body.rebuild(&scenario.mesh, scenario.origin)?;

        let initial = body.particle_positions();
        for (i, &p) in initial.iter().enumerate() {
            body.backend_mut().set_velocity(i, scenario.velocity_at(p));
        }

        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut total_clamps: u64 = 0;
        let mut final_elastic = 0.0;

        let total_start = Instant::now();

        for _ in 0..scenario.timesteps {
            let result = body.advance(scenario.dt)?;
            step_times.push(result.wall_time);
            total_clamps += result.clamped as u64;
            final_elastic = result.elastic_energy;
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        body.finish();

        let max_displacement = body
            .particle_positions()
            .iter()
            .zip(&initial)
            .map(|(p, p0)| p.distance(*p0))
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let lattice = body.lattice();
        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            total_wall_time,
            timesteps: scenario.timesteps,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: body.kinetic_energy(),
            final_elastic_energy: final_elastic,
            max_displacement,
            total_clamps,
            particle_count: lattice.particle_count(),
            shell_count: lattice.shell_count,
            spring_count: lattice.spring_count(),
        };
        tracing::info!(
            scenario = %metrics.scenario,
            particles = metrics.particle_count,
            springs = metrics.spring_count,
            avg_step_ms = metrics.avg_step_time * 1000.0,
            "benchmark finished"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> SquishyResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?;
            results.push(Self::run(&scenario)?);
        }
        Ok(results)
    }
}
