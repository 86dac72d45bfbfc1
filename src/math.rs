//! Shared numerical primitives anchored on `num-complex`.

use num_complex::Complex;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances.
pub type CScalar = Complex<Scalar>;

/// The imaginary unit `j`.
pub const J: CScalar = Complex::new(0.0, 1.0);

/// Returns `(j·ω)^exponent` for a non-negative angular frequency.
///
/// Evaluated in polar form so fractional exponents stay on the principal branch.
#[must_use]
pub fn j_omega_pow(omega: Scalar, exponent: Scalar) -> CScalar {
    Complex::from_polar(omega.powf(exponent), exponent * std::f64::consts::FRAC_PI_2)
}

/// Returns true when `z` is exactly zero, a short circuit.
#[inline]
#[must_use]
pub fn is_short(z: CScalar) -> bool {
    z.re == 0.0 && z.im == 0.0
}

/// Returns true when either part of `z` is infinite (an open circuit).
#[inline]
#[must_use]
pub fn is_open(z: CScalar) -> bool {
    z.re.is_infinite() || z.im.is_infinite()
}
