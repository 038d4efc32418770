//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};
use squishy_types::{SquishyError, SquishyResult};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Number of timesteps executed.
    pub timesteps: u32,
    /// Average wall-clock time per timestep (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Kinetic energy after the last step.
    pub final_kinetic_energy: f64,
    /// Elastic energy stored in the springs at the last step.
    pub final_elastic_energy: f64,
    /// Maximum particle displacement from its initial position.
    pub max_displacement: f32,
    /// Stretch clamp activations summed over all steps.
    pub total_clamps: u64,
    pub particle_count: usize,
    pub shell_count: usize,
    pub spring_count: usize,
}

impl BenchmarkMetrics {
    /// CSV header matching [`to_csv_row`](Self::to_csv_row).
    pub fn to_csv_header() -> String {
        [
            "scenario",
            "particle_count",
            "shell_count",
            "spring_count",
            "timesteps",
            "total_wall_time_s",
            "avg_step_ms",
            "min_step_ms",
            "max_step_ms",
            "final_ke",
            "final_elastic",
            "max_displacement",
            "total_clamps",
        ]
        .join(",")
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.6},{}",
            self.scenario,
            self.particle_count,
            self.shell_count,
            self.spring_count,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.final_elastic_energy,
            self.max_displacement,
            self.total_clamps,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    /// Format multiple metrics as a pretty-printed JSON array.
    pub fn to_json(metrics: &[BenchmarkMetrics]) -> SquishyResult<String> {
        serde_json::to_string_pretty(metrics)
            .map_err(|e| SquishyError::Serialization(e.to_string()))
    }
}
