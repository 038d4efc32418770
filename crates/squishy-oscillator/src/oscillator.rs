//! One animated channel driven by the closed-form response.

use squishy_types::SquishyResult;

use crate::channel::Animatable;
use crate::params::OscillatorParams;
use crate::response::Response;

/// A value chasing a target like a mass on a damped spring.
///
/// The channel remembers where it started, where it is going, the velocity
/// it was released with, and how long ago that was. Every evaluation
/// recomputes the exact state from those four facts.
///
/// # Example
/// ```
/// use squishy_oscillator::{Oscillator, OscillatorParams};
///
/// let mut zoom = Oscillator::new(OscillatorParams::default(), 1.0f32).unwrap();
/// zoom.retarget(2.0, 0.0);
/// for _ in 0..120 {
///     zoom.evaluate(1.0 / 60.0);
/// }
/// assert!((zoom.value() - 2.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator<T: Animatable> {
    params: OscillatorParams,
    start: T,
    end: T,
    initial_velocity: T,
    elapsed: f64,
    value: T,
    velocity: T,
}

impl<T: Animatable> Oscillator<T> {
    /// Creates an oscillator at rest on `initial`.
    ///
    /// Fails if `params` do not pass [`OscillatorParams::validate`].
    pub fn new(params: OscillatorParams, initial: T) -> SquishyResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            start: initial,
            end: initial,
            initial_velocity: T::default(),
            elapsed: 0.0,
            value: initial,
            velocity: T::default(),
        })
    }

    /// Advances the elapsed time by `dt` and returns the new value.
    pub fn evaluate(&mut self, dt: f64) -> T {
        self.elapsed += dt;
        let (value, velocity) = self.sample(self.elapsed);
        self.value = value;
        self.velocity = velocity;
        value
    }

    /// Value and velocity `t` seconds after the last retarget, without
    /// changing any state.
    pub fn sample(&self, t: f64) -> (T, T) {
        let r = Response::at(&self.params, t);

        // Work on the remaining offset to the target; its rate is the
        // negated value velocity.
        let offset0 = self.end - self.start;
        let rate0 = T::default() - self.initial_velocity;

        let offset = offset0.scale(r.pos_from_offset) + rate0.scale(r.pos_from_rate);
        let rate = offset0.scale(r.vel_from_offset) + rate0.scale(r.vel_from_rate);

        (self.end - offset, T::default() - rate)
    }

    /// Points the oscillator at a new target.
    ///
    /// The current value becomes the start value and the elapsed time
    /// restarts at zero. Passing [`velocity`](Self::velocity) keeps the
    /// motion continuous across the switch. Call this on every target
    /// change.
    pub fn retarget(&mut self, end: T, velocity: T) {
        self.start = self.value;
        self.end = end;
        self.initial_velocity = velocity;
        self.elapsed = 0.0;
    }

    /// Zeroes the elapsed time, value and velocity. Targets are kept.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.value = T::default();
        self.velocity = T::default();
    }

    /// Jumps straight to the target and stops.
    pub fn snap_to_target(&mut self) {
        self.start = self.end;
        self.value = self.end;
        self.velocity = T::default();
        self.initial_velocity = T::default();
        self.elapsed = 0.0;
    }

    /// True once both the remaining offset and the velocity are within the
    /// given tolerances.
    pub fn is_settled(&self, eps_value: f64, eps_velocity: f64) -> bool {
        (self.end - self.value).magnitude_squared() < eps_value * eps_value
            && self.velocity.magnitude_squared() < eps_velocity * eps_velocity
    }

    /// Replaces the physical parameters. The current motion continues from
    /// the present value and velocity under the new parameters.
    ///
    /// Invalid parameters are rejected and the oscillator is left unchanged.
    pub fn set_params(&mut self, params: OscillatorParams) -> SquishyResult<()> {
        params.validate()?;
        tracing::debug!(?params, regime = ?params.regime(), "oscillator parameters changed");
        self.params = params;
        self.retarget(self.end, self.velocity);
        Ok(())
    }

    pub fn params(&self) -> &OscillatorParams {
        &self.params
    }

    /// Value at the last evaluation.
    pub fn value(&self) -> T {
        self.value
    }

    /// Velocity at the last evaluation.
    pub fn velocity(&self) -> T {
        self.velocity
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    /// Seconds since the last retarget.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
