//! Closed-form impulse/step response of the damped oscillator.
//!
//! With `x` the remaining offset to the target, the solution of
//! `m·x'' + c·x' + k·x = 0` is linear in the initial offset `x0` and
//! initial rate `v0`:
//!
//! ```text
//! x(t)  = pos_from_offset · x0 + pos_from_rate · v0
//! x'(t) = vel_from_offset · x0 + vel_from_rate · v0
//! ```
//!
//! so the four coefficients are computed once per evaluation and applied
//! to any channel type.

use crate::params::{DampingRegime, OscillatorParams};

/// Response coefficients at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    pub pos_from_offset: f64,
    pub pos_from_rate: f64,
    pub vel_from_offset: f64,
    pub vel_from_rate: f64,
}

impl Response {
    /// Evaluates the response of `params` at time `t` after release.
    pub fn at(params: &OscillatorParams, t: f64) -> Self {
        let omega0 = params.natural_frequency();
        let zeta = params.damping_ratio();

        match params.regime() {
            DampingRegime::Underdamped => {
                let decay = omega0 * zeta;
                let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
                let e = (-decay * t).exp();
                let (sin, cos) = (omega1 * t).sin_cos();

                // x = e·(x0·cos + (v0 + decay·x0)/ω1 · sin)
                Self {
                    pos_from_offset: e * (cos + decay / omega1 * sin),
                    pos_from_rate: e * sin / omega1,
                    vel_from_offset: -e * sin * (omega1 + decay * decay / omega1),
                    vel_from_rate: e * (cos - decay / omega1 * sin),
                }
            }
            DampingRegime::Overdamped => {
                let omega2 = omega0 * (zeta * zeta - 1.0).sqrt();
                let z1 = -omega0 * zeta - omega2;
                let z2 = -omega0 * zeta + omega2;
                let e1 = (z1 * t).exp();
                let e2 = (z2 * t).exp();
                let inv = 1.0 / (z2 - z1);

                // x = c1·e^(z1 t) + c2·e^(z2 t),
                // c1 = (x0·z2 - v0)/(z2 - z1), c2 = (v0 - x0·z1)/(z2 - z1)
                Self {
                    pos_from_offset: (z2 * e1 - z1 * e2) * inv,
                    pos_from_rate: (e2 - e1) * inv,
                    vel_from_offset: z1 * z2 * (e1 - e2) * inv,
                    vel_from_rate: (z2 * e2 - z1 * e1) * inv,
                }
            }
            DampingRegime::CriticallyDamped => {
                let e = (-omega0 * t).exp();

                // x = e·(x0 + (v0 + ω0·x0)·t)
                Self {
                    pos_from_offset: e * (1.0 + omega0 * t),
                    pos_from_rate: e * t,
                    vel_from_offset: -e * omega0 * omega0 * t,
                    vel_from_rate: e * (1.0 - omega0 * t),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_regimes() -> [OscillatorParams; 3] {
        [
            OscillatorParams::with_damping_ratio(1.0, 100.0, 0.3),
            OscillatorParams::critically_damped(1.0, 100.0),
            OscillatorParams::with_damping_ratio(1.0, 100.0, 2.5),
        ]
    }

    #[test]
    fn initial_conditions_hold_at_zero() {
        for p in all_regimes() {
            let r = Response::at(&p, 0.0);
            assert!((r.pos_from_offset - 1.0).abs() < 1e-12, "{p:?}");
            assert!(r.pos_from_rate.abs() < 1e-12, "{p:?}");
            assert!(r.vel_from_offset.abs() < 1e-12, "{p:?}");
            assert!((r.vel_from_rate - 1.0).abs() < 1e-12, "{p:?}");
        }
    }

    #[test]
    fn velocity_is_derivative_of_position() {
        let h = 1e-6;
        for p in all_regimes() {
            for &t in &[0.01, 0.1, 0.35] {
                let a = Response::at(&p, t - h);
                let b = Response::at(&p, t + h);
                let r = Response::at(&p, t);
                let d_off = (b.pos_from_offset - a.pos_from_offset) / (2.0 * h);
                let d_rate = (b.pos_from_rate - a.pos_from_rate) / (2.0 * h);
                assert!((d_off - r.vel_from_offset).abs() < 1e-4, "{p:?} t={t}");
                assert!((d_rate - r.vel_from_rate).abs() < 1e-4, "{p:?} t={t}");
            }
        }
    }
}
