//! Physical constants and simulation defaults.

/// Gravitational acceleration (units/s²).
pub const GRAVITY: f32 = 9.81;

/// Default fixed physics timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Below this length a spring direction is treated as undefined and the
/// spring is skipped for the step.
pub const MIN_SPRING_LENGTH: f32 = 1.0e-6;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;

/// Ear-clipping convexity threshold. Triples whose cross product does not
/// exceed this are never clipped.
pub const EAR_EPSILON: f32 = f32::EPSILON;

/// Default particle collision radius.
pub const DEFAULT_PARTICLE_RADIUS: f32 = 2.0;

/// Multiplier from fill-grid step to connection distance (≈ √2).
pub const DIAGONAL_FACTOR: f32 = 1.415;
