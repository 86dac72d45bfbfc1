//! Frequency grids, batch evaluation, and spectrum post-processing.

use num_complex::Complex;

use crate::circuits::Circuit;
use crate::errors::EisError;
use crate::math::Scalar;

/// `n` frequencies evenly spaced from `start` to `stop` inclusive.
#[must_use]
pub fn linear_grid(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    if n < 2 {
        return std::iter::repeat(start).take(n).collect();
    }
    let last = (n - 1) as Scalar;
    (0..n)
        .map(|i| {
            let t = i as Scalar / last;
            start * (1.0 - t) + stop * t
        })
        .collect()
}

/// `n` frequencies with a constant ratio between neighbours, from `start_hz`
/// to `stop_hz` inclusive. Empty unless both bounds are positive.
#[must_use]
pub fn log_grid(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    if start_hz <= 0.0 || stop_hz <= 0.0 {
        return Vec::new();
    }
    linear_grid(start_hz.ln(), stop_hz.ln(), n)
        .into_iter()
        .map(Scalar::exp)
        .collect()
}

/// Impedance sample at one frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    /// Linear frequency (Hz).
    pub frequency: Scalar,
    /// Complex impedance (Ω).
    pub impedance: Complex<Scalar>,
}

impl FrequencyPoint {
    /// `|Z|` in ohms.
    #[must_use]
    pub fn magnitude(&self) -> Scalar {
        self.impedance.norm()
    }

    /// Phase of `Z` in degrees; capacitive behaviour is negative.
    #[must_use]
    pub fn phase_deg(&self) -> Scalar {
        self.impedance.arg().to_degrees()
    }

    /// Nyquist coordinates `(Re Z, -Im Z)`.
    #[must_use]
    pub fn nyquist(&self) -> (Scalar, Scalar) {
        (self.impedance.re, -self.impedance.im)
    }
}

/// Evaluates `circuit` at each frequency (Hz) and pairs the results.
pub fn impedance_sweep<I>(
    circuit: &Circuit,
    frequencies: I,
) -> Result<Vec<FrequencyPoint>, EisError>
where
    I: IntoIterator<Item = Scalar>,
{
    let frequencies: Vec<Scalar> = frequencies.into_iter().collect();
    let impedances = circuit.evaluate_sweep(&frequencies)?;
    Ok(frequencies
        .into_iter()
        .zip(impedances)
        .map(|(frequency, impedance)| FrequencyPoint {
            frequency,
            impedance,
        })
        .collect())
}

/// Bode rows `(frequency, |Z|, phase in degrees)`.
#[must_use]
pub fn bode(points: &[FrequencyPoint]) -> Vec<(Scalar, Scalar, Scalar)> {
    points
        .iter()
        .map(|p| (p.frequency, p.magnitude(), p.phase_deg()))
        .collect()
}

/// Nyquist curve `(Re Z, -Im Z)`, the usual impedance-spectroscopy plot.
#[must_use]
pub fn nyquist(points: &[FrequencyPoint]) -> Vec<(Scalar, Scalar)> {
    points.iter().map(FrequencyPoint::nyquist).collect()
}
