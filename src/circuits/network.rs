use num_complex::Complex;

use crate::math::{is_open, is_short, CScalar, Scalar};
use crate::parser::Operator;

/// Connection topology between two sub-circuits.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Series connection (impedances add linearly).
    Series,
    /// Parallel connection (admittances add linearly).
    Parallel,
}

impl ConnectionKind {
    /// Combines two impedances with this topology.
    #[must_use]
    pub fn combine(self, left: CScalar, right: CScalar) -> CScalar {
        match self {
            Self::Series => left + right,
            Self::Parallel => {
                if is_short(left) || is_short(right) {
                    return Complex::new(0.0, 0.0);
                }
                if is_open(left) {
                    return right;
                }
                if is_open(right) {
                    return left;
                }
                let admittance = left.inv() + right.inv();
                if is_short(admittance) {
                    return Complex::new(Scalar::INFINITY, 0.0);
                }
                admittance.inv()
            }
        }
    }
}

impl From<Operator> for ConnectionKind {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Dash => Self::Series,
            Operator::Pipe => Self::Parallel,
        }
    }
}

/// Series combination of any number of impedances.
#[must_use]
pub fn series(impedances: impl IntoIterator<Item = CScalar>) -> CScalar {
    impedances.into_iter().sum()
}

/// Parallel combination of any number of impedances. An empty set is an open
/// circuit.
#[must_use]
pub fn parallel(impedances: impl IntoIterator<Item = CScalar>) -> CScalar {
    impedances
        .into_iter()
        .reduce(|acc, z| ConnectionKind::Parallel.combine(acc, z))
        .unwrap_or(Complex::new(f64::INFINITY, 0.0))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::component::capacitor_impedance;

    #[test]
    fn series_adds_impedances() {
        let z = series([Complex::new(100.0, 0.0), Complex::new(50.0, 2.0)]);
        assert_relative_eq!(z.re, 150.0);
        assert_relative_eq!(z.im, 2.0);
    }

    #[test]
    fn parallel_combines_admittance() {
        let z = parallel([Complex::new(100.0, 0.0), Complex::new(100.0, 0.0)]);
        assert_relative_eq!(z.re, 50.0);
        let three = parallel([Complex::new(3.0, 0.0); 3]);
        assert_relative_eq!(three.re, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn parallel_handles_reactive_elements() {
        let zc = capacitor_impedance(std::f64::consts::TAU, 5.0);
        let z = ConnectionKind::Parallel.combine(zc, Complex::new(2.0, 0.0));
        let expected = Complex::new(1.0, 0.0) / (Complex::new(1.0, 0.0) / zc + 0.5);
        assert_relative_eq!(z.re, expected.re, epsilon = 1.0e-12);
        assert_relative_eq!(z.im, expected.im, epsilon = 1.0e-12);
    }

    #[test]
    fn short_and_open_branches() {
        let r = Complex::new(10.0, 0.0);
        let short = Complex::new(0.0, 0.0);
        let open = Complex::new(f64::INFINITY, 0.0);
        assert_eq!(ConnectionKind::Parallel.combine(r, short), short);
        assert_eq!(ConnectionKind::Parallel.combine(open, r), r);
        assert!(parallel(std::iter::empty()).re.is_infinite());
    }

    #[test]
    fn cancelling_admittances_are_an_open_circuit() {
        let z = ConnectionKind::Parallel.combine(Complex::new(1.0, 0.0), Complex::new(-1.0, 0.0));
        assert!(z.re.is_infinite());
        assert!(!z.im.is_nan());

        // Ideal LC tank at resonance: jX in parallel with -jX.
        let tank =
            ConnectionKind::Parallel.combine(Complex::new(0.0, 4.0), Complex::new(0.0, -4.0));
        assert!(tank.re.is_infinite());
    }

    #[test]
    fn tiny_impedances_are_not_treated_as_shorts() {
        let z = parallel([Complex::new(1.0e-17, 0.0), Complex::new(1.0e-17, 0.0)]);
        assert_relative_eq!(z.re, 5.0e-18, max_relative = 1.0e-12);
    }

    #[test]
    fn operators_map_to_topologies() {
        assert_eq!(ConnectionKind::from(Operator::Dash), ConnectionKind::Series);
        assert_eq!(ConnectionKind::from(Operator::Pipe), ConnectionKind::Parallel);
    }
}
