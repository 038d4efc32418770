//! Debug overlay draw queue.
//!
//! The subsystem that renders overlays owns a [`DrawQueue`]. Producers push
//! timed requests into it during a step; the owner calls
//! [`DrawQueue::drain_frame`] once per rendered frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);

    const PALETTE: [Self; 6] = [
        Self([0.95, 0.45, 0.55, 1.0]),
        Self([0.45, 0.80, 0.95, 1.0]),
        Self([0.60, 0.90, 0.45, 1.0]),
        Self([0.98, 0.80, 0.35, 1.0]),
        Self([0.75, 0.55, 0.95, 1.0]),
        Self([0.40, 0.90, 0.80, 1.0]),
    ];

    /// Stable colour for an index, cycling through a small palette.
    pub fn indexed(i: usize) -> Self {
        Self::PALETTE[i % Self::PALETTE.len()]
    }
}

/// Geometry of one overlay primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawShape {
    Line { from: Vec3, to: Vec3 },
    /// Wireframe sphere.
    Sphere { center: Vec3, radius: f32 },
}

/// A primitive to draw until its time-to-live runs out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub shape: DrawShape,
    pub color: Color,
    /// Seconds left. Zero draws for exactly one frame.
    pub ttl: f32,
}

/// Queue of timed draw requests.
#[derive(Debug, Clone, Default)]
pub struct DrawQueue {
    requests: Vec<DrawRequest>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: DrawRequest) {
        self.requests.push(request);
    }

    pub fn line(&mut self, from: Vec3, to: Vec3, color: Color, ttl: f32) {
        self.push(DrawRequest {
            shape: DrawShape::Line { from, to },
            color,
            ttl,
        });
    }

    pub fn sphere(&mut self, center: Vec3, radius: f32, color: Color, ttl: f32) {
        self.push(DrawRequest {
            shape: DrawShape::Sphere { center, radius },
            color,
            ttl,
        });
    }

    /// Requests to draw this frame.
    ///
    /// Every queued request is returned once. Afterwards each one ages by
    /// `dt` and only those with time left stay queued.
    pub fn drain_frame(&mut self, dt: f32) -> Vec<DrawRequest> {
        let frame = self.requests.clone();
        self.requests.retain_mut(|r| {
            r.ttl -= dt;
            r.ttl > 0.0
        });
        tracing::trace!(
            drawn = frame.len(),
            expired = frame.len() - self.requests.len(),
            "draw queue drained"
        );
        frame
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}
