//! Unit conversions and fixed parameters shared by the evaluator.

use std::f64::consts::TAU;

/// Value assigned to every component when a circuit is first parsed.
pub const DEFAULT_COMPONENT_VALUE: f64 = 1.0;
/// Exponent used for a constant-phase element when none is supplied.
pub const DEFAULT_CPE_EXPONENT: f64 = 1.0;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    TAU * hz
}

/// Returns the linear frequency in hertz for an angular frequency `omega`.
#[inline]
#[must_use]
pub fn linear_frequency(omega: f64) -> f64 {
    omega / TAU
}
