//! Numeric constants and unit scales shared by the solvers.
//!
//! ## Tolerances
//!
//! [`CRITICAL_DAMPING_TOLERANCE`] is part of the public contract of the
//! step-response solver: a damping ratio ξ with `|ξ − 1| < 1e-9` is treated
//! as critically damped. Ratios outside that band use the under- or
//! overdamped closed forms, which converge to the critical one as ξ → 1.

use std::f64::consts::PI;

use crate::math::Scalar;

/// Band around ξ = 1 routed to the critically damped closed form.
pub const CRITICAL_DAMPING_TOLERANCE: Scalar = 1.0e-9;

/// Step (s) of the central difference used for inductor voltage.
pub const DERIVATIVE_STEP: Scalar = 1.0e-6;

/// Amperes to milliamperes.
pub const MILLI_PER_UNIT: Scalar = 1.0e3;
/// SI prefix milli (10⁻³).
pub const MILLI: Scalar = 1.0e-3;
/// SI prefix micro (10⁻⁶).
pub const MICRO: Scalar = 1.0e-6;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}

/// Returns the linear frequency (Hz) corresponding to `omega` (rad/s).
#[inline]
#[must_use]
pub fn linear_frequency(omega: Scalar) -> Scalar {
    omega / (2.0 * PI)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn angular_and_linear_frequency_are_inverse() {
        let hz = 159.154_943_091_895_3;
        assert_relative_eq!(angular_frequency(hz), 1000.0, max_relative = 1.0e-12);
        assert_relative_eq!(linear_frequency(angular_frequency(hz)), hz, max_relative = 1.0e-12);
    }
}
