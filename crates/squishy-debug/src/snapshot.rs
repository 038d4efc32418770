//! State snapshot serialization for replay and debugging.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use squishy_types::{SquishyError, SquishyResult};

/// Particle positions and velocities at one fixed step.
///
/// Serialized with `bincode` for compact binary output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Fixed step when this snapshot was taken.
    pub step: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Interleaved positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
    /// Interleaved velocities.
    pub velocities: Vec<f32>,
    pub particle_count: usize,
}

impl StateSnapshot {
    /// Creates a snapshot from SoA position and velocity buffers.
    #[allow(clippy::too_many_arguments)]
    pub fn from_soa(
        step: u64,
        sim_time: f64,
        pos_x: &[f32],
        pos_y: &[f32],
        pos_z: &[f32],
        vel_x: &[f32],
        vel_y: &[f32],
        vel_z: &[f32],
    ) -> Self {
        let n = pos_x.len();
        let mut positions = Vec::with_capacity(n * 3);
        let mut velocities = Vec::with_capacity(n * 3);

        for i in 0..n {
            positions.extend_from_slice(&[pos_x[i], pos_y[i], pos_z[i]]);
            velocities.extend_from_slice(&[vel_x[i], vel_y[i], vel_z[i]]);
        }

        Self {
            step,
            sim_time,
            positions,
            velocities,
            particle_count: n,
        }
    }

    /// Creates a snapshot from per-particle vectors.
    pub fn from_points(step: u64, sim_time: f64, positions: &[Vec3], velocities: &[Vec3]) -> Self {
        Self {
            step,
            sim_time,
            positions: positions.iter().flat_map(|p| p.to_array()).collect(),
            velocities: velocities.iter().flat_map(|v| v.to_array()).collect(),
            particle_count: positions.len(),
        }
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities[i * 3..i * 3 + 3])
    }

    /// Largest per-particle position difference to `other`, or `None` when
    /// the particle counts differ.
    pub fn max_position_delta(&self, other: &Self) -> Option<f32> {
        if self.particle_count != other.particle_count {
            return None;
        }
        Some(
            (0..self.particle_count)
                .map(|i| self.position(i).distance(other.position(i)))
                .fold(0.0, f32::max),
        )
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> SquishyResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| SquishyError::Serialization(format!("snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> SquishyResult<Self> {
        let snapshot: Self = bincode::deserialize(data).map_err(|e| {
            tracing::warn!(bytes = data.len(), error = %e, "snapshot decode failed");
            SquishyError::Serialization(format!("snapshot deserialization failed: {e}"))
        })?;
        if snapshot.positions.len() != snapshot.particle_count * 3
            || snapshot.velocities.len() != snapshot.particle_count * 3
        {
            tracing::warn!(
                particles = snapshot.particle_count,
                positions = snapshot.positions.len(),
                velocities = snapshot.velocities.len(),
                "snapshot buffers inconsistent"
            );
            return Err(SquishyError::Serialization(format!(
                "snapshot buffers do not match particle count {}",
                snapshot.particle_count
            )));
        }
        Ok(snapshot)
    }
}
