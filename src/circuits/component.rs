use num_complex::Complex;

use crate::math::{j_omega_pow, CScalar, Scalar};

/// Trait implemented by anything that can provide a frequency-domain impedance.
pub trait Component {
    /// Returns the impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> CScalar;

    /// Human-readable identifier (e.g. `R1`).
    fn name(&self) -> &str;
}

/// Impedance models selectable from the circuit notation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// `R`, ideal resistor.
    Resistor,
    /// `C`, ideal capacitor.
    Capacitor,
    /// `L`, ideal inductor.
    Inductor,
    /// `Q`, constant-phase element.
    ConstantPhaseElement,
    /// `W`, semi-infinite Warburg diffusion element.
    Warburg,
}

impl ComponentKind {
    /// Every kind, in notation order.
    pub const ALL: [Self; 5] = [
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::ConstantPhaseElement,
        Self::Warburg,
    ];

    /// Classifies a component name by its leading letter.
    ///
    /// Returns `None` for letters without an impedance model; such names still
    /// parse but cannot be evaluated.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.chars().next()? {
            'R' => Some(Self::Resistor),
            'C' => Some(Self::Capacitor),
            'L' => Some(Self::Inductor),
            'Q' => Some(Self::ConstantPhaseElement),
            'W' => Some(Self::Warburg),
            _ => None,
        }
    }

    /// Letter used for this kind in the notation.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Resistor => 'R',
            Self::Capacitor => 'C',
            Self::Inductor => 'L',
            Self::ConstantPhaseElement => 'Q',
            Self::Warburg => 'W',
        }
    }

    /// Impedance of one element of this kind. `exponent` only affects the
    /// constant-phase element.
    #[must_use]
    pub fn impedance(self, omega: Scalar, value: Scalar, exponent: Scalar) -> CScalar {
        match self {
            Self::Resistor => resistor_impedance(value),
            Self::Capacitor => capacitor_impedance(omega, value),
            Self::Inductor => inductor_impedance(omega, value),
            Self::ConstantPhaseElement => cpe_impedance(omega, value, exponent),
            Self::Warburg => warburg_impedance(omega, value),
        }
    }
}

/// `Z = R`.
#[must_use]
pub fn resistor_impedance(resistance: Scalar) -> CScalar {
    Complex::new(resistance, 0.0)
}

/// `Z = 1 / (jωC)`; open circuit when `ωC` is exactly zero.
#[must_use]
pub fn capacitor_impedance(omega: Scalar, capacitance: Scalar) -> CScalar {
    let susceptance = omega * capacitance;
    if susceptance == 0.0 {
        Complex::new(Scalar::INFINITY, 0.0)
    } else {
        Complex::new(0.0, -1.0 / susceptance)
    }
}

/// `Z = jωL`.
#[must_use]
pub fn inductor_impedance(omega: Scalar, inductance: Scalar) -> CScalar {
    Complex::new(0.0, omega * inductance)
}

/// `Z = Q / (jω)^a`; open circuit at DC for positive exponents.
#[must_use]
pub fn cpe_impedance(omega: Scalar, q: Scalar, exponent: Scalar) -> CScalar {
    let denominator = j_omega_pow(omega, exponent);
    if denominator.norm() == 0.0 {
        Complex::new(Scalar::INFINITY, 0.0)
    } else {
        Complex::new(q, 0.0) / denominator
    }
}

/// `Z = W/√ω + W/(j√ω)`; open circuit at DC.
#[must_use]
pub fn warburg_impedance(omega: Scalar, sigma: Scalar) -> CScalar {
    let root = omega.sqrt();
    if root == 0.0 {
        Complex::new(Scalar::INFINITY, 0.0)
    } else {
        let part = sigma / root;
        Complex::new(part, -part)
    }
}

/// A named component instance bound to its current parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element<'a> {
    /// Instance literal such as `Q1`.
    pub literal: &'a str,
    /// Impedance model.
    pub kind: ComponentKind,
    /// Magnitude parameter.
    pub value: Scalar,
    /// Constant-phase exponent; ignored by other kinds.
    pub exponent: Scalar,
}

impl Component for Element<'_> {
    fn impedance(&self, omega: Scalar) -> CScalar {
        self.kind.impedance(omega, self.value, self.exponent)
    }

    fn name(&self) -> &str {
        self.literal
    }
}
