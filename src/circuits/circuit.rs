//! Circuit model: parsed postfix form plus per-component values.

use std::collections::HashMap;

use crate::constants::{angular_frequency, DEFAULT_COMPONENT_VALUE, DEFAULT_CPE_EXPONENT};
use crate::math::{CScalar, Scalar};
use crate::parser::{Operator, ParseError, Parser, ParserConfig, Postfix, TokenKind};

use super::component::{Component, ComponentKind, Element};
use super::network::ConnectionKind;

/// Constant-phase exponents keyed by component literal (e.g. `Q1`).
pub type Exponents = HashMap<String, Scalar>;

/// Stack-state failures while reducing a postfix sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    /// An operator found fewer than two operands.
    #[error("operator '{operator}' is missing an operand")]
    Underflow {
        /// Symbol of the operator.
        operator: char,
    },
    /// Reduction finished with other than exactly one value.
    #[error("evaluation left {remaining} values on the stack, expected 1")]
    Unbalanced {
        /// Stack depth at the end of evaluation.
        remaining: usize,
    },
}

/// Errors raised while building, configuring, or evaluating a circuit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CircuitError {
    /// The source notation is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// No component with this literal exists in the circuit.
    #[error("component {0} not found in circuit")]
    ComponentNotFound(String),
    /// The component's letter has no impedance model.
    #[error("component {literal} has no impedance model")]
    UnsupportedComponent {
        /// Literal of the component.
        literal: String,
    },
    /// Frequencies must be finite and non-negative.
    #[error("invalid frequency: {0}")]
    InvalidFrequency(Scalar),
    /// The postfix sequence could not be reduced to a single impedance.
    #[error(transparent)]
    Stack(#[from] StackError),
}

impl CircuitError {
    /// True when the failure reflects a malformed postfix sequence rather than
    /// a bad argument.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Stack(_))
    }
}

/// Insertion-ordered mapping from component literal to value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentValues {
    entries: Vec<(String, Scalar)>,
}

impl ComponentValues {
    fn from_postfix(postfix: &Postfix) -> Self {
        let mut entries: Vec<(String, Scalar)> = Vec::new();
        for literal in postfix.literals() {
            if !entries.iter().any(|(name, _)| name == literal) {
                entries.push((literal.to_owned(), DEFAULT_COMPONENT_VALUE));
            }
        }
        Self { entries }
    }

    /// Value of `literal`, if present.
    #[must_use]
    pub fn get(&self, literal: &str) -> Option<Scalar> {
        self.entries
            .iter()
            .find(|(name, _)| name == literal)
            .map(|&(_, value)| value)
    }

    fn position(&self, literal: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == literal)
    }

    fn get_mut(&mut self, literal: &str) -> Option<&mut Scalar> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == literal)
            .map(|(_, value)| value)
    }

    /// True when `literal` names a component of the circuit.
    #[must_use]
    pub fn contains(&self, literal: &str) -> bool {
        self.get(literal).is_some()
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a circuit without components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Literals in first-appearance order.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(literal, value)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Scalar)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// One instruction of the compiled postfix sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Push the impedance of the component stored at `slot`.
    Operand {
        slot: usize,
        kind: Option<ComponentKind>,
    },
    /// Replace the top two operands with their combination.
    Combine(Operator),
}

fn compile(postfix: &Postfix, values: &ComponentValues) -> Vec<Step> {
    postfix
        .iter()
        .filter_map(|token| match &token.kind {
            TokenKind::Component { literal, component } => values
                .position(literal)
                .map(|slot| Step::Operand {
                    slot,
                    kind: *component,
                }),
            _ => token.operator().map(Step::Combine),
        })
        .collect()
}

/// Equivalent circuit parsed from notation such as `R - (C | R)`.
///
/// Every component starts at a value of 1.0. Values are read when
/// [`Circuit::evaluate`] runs, not captured at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    source: String,
    postfix: Postfix,
    steps: Vec<Step>,
    values: ComponentValues,
}

impl Circuit {
    /// Parses `source` with the default parser configuration.
    pub fn new(source: impl Into<String>) -> Result<Self, CircuitError> {
        Self::with_config(source, ParserConfig::default())
    }

    /// Parses `source` with `config`.
    pub fn with_config(
        source: impl Into<String>,
        config: ParserConfig,
    ) -> Result<Self, CircuitError> {
        let source = source.into();
        let postfix = Parser::with_config(config).parse(&source)?;
        let values = ComponentValues::from_postfix(&postfix);
        let steps = compile(&postfix, &values);
        tracing::debug!(components = values.len(), steps = steps.len(), "built circuit");
        Ok(Self {
            source,
            postfix,
            steps,
            values,
        })
    }

    /// Notation the circuit was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed postfix sequence.
    #[must_use]
    pub const fn postfix(&self) -> &Postfix {
        &self.postfix
    }

    /// All component values in first-appearance order.
    #[must_use]
    pub const fn components(&self) -> &ComponentValues {
        &self.values
    }

    /// Current value of `literal`.
    #[must_use]
    pub fn component(&self, literal: &str) -> Option<Scalar> {
        self.values.get(literal)
    }

    /// Overwrites the value of an existing component.
    pub fn set_component(&mut self, literal: &str, value: Scalar) -> Result<(), CircuitError> {
        let slot = self
            .values
            .get_mut(literal)
            .ok_or_else(|| CircuitError::ComponentNotFound(literal.to_owned()))?;
        *slot = value;
        Ok(())
    }

    /// Applies several values in order. Stops at the first unknown literal;
    /// values set before it stay applied.
    pub fn set_components<I, S>(&mut self, values: I) -> Result<(), CircuitError>
    where
        I: IntoIterator<Item = (S, Scalar)>,
        S: AsRef<str>,
    {
        for (literal, value) in values {
            self.set_component(literal.as_ref(), value)?;
        }
        Ok(())
    }

    /// Complex impedance at `frequency` (Hz).
    pub fn evaluate(&self, frequency: Scalar) -> Result<CScalar, CircuitError> {
        self.evaluate_with_exponents(frequency, &Exponents::new())
    }

    /// Complex impedance at `frequency` (Hz) with constant-phase exponents.
    /// Elements missing from `exponents` use an exponent of 1.
    pub fn evaluate_with_exponents(
        &self,
        frequency: Scalar,
        exponents: &Exponents,
    ) -> Result<CScalar, CircuitError> {
        self.check_exponents(exponents)?;
        self.reduce(frequency, exponents)
    }

    /// Complex impedance at each frequency (Hz), in input order.
    pub fn evaluate_sweep(&self, frequencies: &[Scalar]) -> Result<Vec<CScalar>, CircuitError> {
        self.evaluate_sweep_with_exponents(frequencies, &Exponents::new())
    }

    /// Batch form of [`Circuit::evaluate_with_exponents`].
    pub fn evaluate_sweep_with_exponents(
        &self,
        frequencies: &[Scalar],
        exponents: &Exponents,
    ) -> Result<Vec<CScalar>, CircuitError> {
        let _span = tracing::debug_span!("evaluate_sweep", points = frequencies.len()).entered();
        self.check_exponents(exponents)?;
        frequencies
            .iter()
            .map(|&frequency| self.reduce(frequency, exponents))
            .collect()
    }

    fn check_exponents(&self, exponents: &Exponents) -> Result<(), CircuitError> {
        match exponents.keys().find(|literal| !self.values.contains(literal.as_str())) {
            Some(literal) => Err(CircuitError::ComponentNotFound(literal.clone())),
            None => Ok(()),
        }
    }

    fn reduce(&self, frequency: Scalar, exponents: &Exponents) -> Result<CScalar, CircuitError> {
        if !frequency.is_finite() || frequency < 0.0 {
            return Err(CircuitError::InvalidFrequency(frequency));
        }
        let omega = angular_frequency(frequency);
        let mut stack: Vec<CScalar> = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            match *step {
                Step::Operand { slot, kind } => {
                    let (literal, value) = &self.values.entries[slot];
                    let kind = kind.ok_or_else(|| CircuitError::UnsupportedComponent {
                        literal: literal.clone(),
                    })?;
                    let element = Element {
                        literal,
                        kind,
                        value: *value,
                        exponent: exponents
                            .get(literal)
                            .copied()
                            .unwrap_or(DEFAULT_CPE_EXPONENT),
                    };
                    stack.push(element.impedance(omega));
                }
                Step::Combine(operator) => combine_top(&mut stack, operator)?,
            }
        }

        match stack.as_slice() {
            [impedance] => {
                tracing::trace!(frequency, %impedance, "evaluated circuit");
                Ok(*impedance)
            }
            rest => Err(StackError::Unbalanced {
                remaining: rest.len(),
            }
            .into()),
        }
    }
}

fn combine_top(stack: &mut Vec<CScalar>, operator: Operator) -> Result<(), StackError> {
    let underflow = || StackError::Underflow {
        operator: operator.symbol(),
    };
    let right = stack.pop().ok_or_else(underflow)?;
    let left = stack.pop().ok_or_else(underflow)?;
    stack.push(ConnectionKind::from(operator).combine(left, right));
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use num_complex::Complex;

    use super::*;
    use crate::circuits::component::capacitor_impedance;
    use crate::parser::PrecedenceMode;

    #[test]
    fn defaults_every_component_to_one() {
        let circuit = Circuit::new("R - C | R").unwrap();
        let values: Vec<_> = circuit.components().iter().collect();
        assert_eq!(values, [("R1", 1.0), ("C1", 1.0), ("R2", 1.0)]);
    }

    #[test]
    fn same_letter_components_are_independent() {
        let mut circuit = Circuit::new("R - R").unwrap();
        circuit.set_component("R2", 7.0).unwrap();
        assert_eq!(circuit.component("R1"), Some(1.0));
        assert_eq!(circuit.component("R2"), Some(7.0));
        assert_relative_eq!(circuit.evaluate(1.0).unwrap().re, 8.0);
    }

    #[test]
    fn unknown_literal_is_rejected() {
        let mut circuit = Circuit::new("R | C").unwrap();
        let err = circuit.set_component("L1", 2.0).unwrap_err();
        assert_eq!(err, CircuitError::ComponentNotFound("L1".into()));
        assert_eq!(err.to_string(), "component L1 not found in circuit");
        assert_eq!(circuit.components().len(), 2);
    }

    #[test]
    fn set_components_applies_in_order_until_failure() {
        let mut circuit = Circuit::new("R - C").unwrap();
        circuit.set_components([("R1", 3.0), ("C1", 4.0)]).unwrap();
        assert_eq!(circuit.component("C1"), Some(4.0));

        let err = circuit.set_components([("R1", 5.0), ("X1", 1.0), ("C1", 9.0)]);
        assert!(err.is_err());
        assert_eq!(circuit.component("R1"), Some(5.0));
        assert_eq!(circuit.component("C1"), Some(4.0));
    }

    #[test]
    fn parallel_resistors_halve() {
        let circuit = Circuit::new("R | R").unwrap();
        let z = circuit.evaluate(1.0).unwrap();
        assert_relative_eq!(z.re, 0.5);
        assert_relative_eq!(z.im, 0.0);
    }

    #[test]
    fn series_resistor_with_parallel_rc() {
        let mut circuit = Circuit::new("R - C | R").unwrap();
        circuit
            .set_components([("R1", 10.0), ("C1", 5.0), ("R2", 2.0)])
            .unwrap();
        let z = circuit.evaluate(1.0).unwrap();
        let zc = capacitor_impedance(angular_frequency(1.0), 5.0);
        let one = Complex::new(1.0, 0.0);
        let expected = Complex::new(10.0, 0.0) + one / (one / zc + 0.5);
        assert_relative_eq!(z.re, expected.re, epsilon = 1.0e-12);
        assert_relative_eq!(z.im, expected.im, epsilon = 1.0e-12);
    }

    #[test]
    fn cpe_exponent_is_applied_per_literal() {
        let circuit = Circuit::new("Q - Q").unwrap();
        let mut exponents = Exponents::new();
        exponents.insert("Q2".into(), 0.5);
        let z = circuit.evaluate_with_exponents(1.0, &exponents).unwrap();
        let omega = angular_frequency(1.0);
        let q1 = Complex::new(0.0, -1.0 / omega);
        let q2 = Complex::from_polar(omega.powf(-0.5), -std::f64::consts::FRAC_PI_4);
        assert_relative_eq!(z.re, (q1 + q2).re, epsilon = 1.0e-12);
        assert_relative_eq!(z.im, (q1 + q2).im, epsilon = 1.0e-12);
    }

    #[test]
    fn exponent_for_missing_literal_is_rejected() {
        let circuit = Circuit::new("R - Q").unwrap();
        let mut exponents = Exponents::new();
        exponents.insert("Q2".into(), 0.9);
        assert_eq!(
            circuit.evaluate_with_exponents(1.0, &exponents),
            Err(CircuitError::ComponentNotFound("Q2".into()))
        );
    }

    #[test]
    fn unknown_letters_fail_at_evaluation() {
        let circuit = Circuit::new("R - X").unwrap();
        assert_eq!(circuit.components().len(), 2);
        assert_eq!(
            circuit.evaluate(1.0),
            Err(CircuitError::UnsupportedComponent { literal: "X1".into() })
        );
    }

    #[test]
    fn malformed_postfix_reports_stack_errors() {
        let dangling = Circuit::new("- R").unwrap();
        let err = dangling.evaluate(1.0).unwrap_err();
        assert!(err.is_internal());
        assert_eq!(
            err,
            CircuitError::Stack(StackError::Underflow { operator: '-' })
        );

        let missing_operator = Circuit::new("R C").unwrap();
        assert_eq!(
            missing_operator.evaluate(1.0),
            Err(CircuitError::Stack(StackError::Unbalanced { remaining: 2 }))
        );

        let empty = Circuit::new("").unwrap();
        assert_eq!(
            empty.evaluate(1.0),
            Err(CircuitError::Stack(StackError::Unbalanced { remaining: 0 }))
        );
    }

    #[test]
    fn parse_errors_propagate() {
        let err = Circuit::new("( R - C").unwrap_err();
        assert!(matches!(
            err,
            CircuitError::Parse(ParseError::UnclosedParen { offset: 0 })
        ));
        assert!(!err.is_internal());
    }

    #[test]
    fn picofarad_capacitor_at_microhertz() {
        let mut circuit = Circuit::new("C").unwrap();
        circuit.set_component("C1", 1.0e-12).unwrap();
        let z = circuit.evaluate(1.0e-5).unwrap();
        let expected = -1.0 / (angular_frequency(1.0e-5) * 1.0e-12);
        assert_relative_eq!(z.re, 0.0);
        assert_relative_eq!(z.im, expected, max_relative = 1.0e-12);
    }

    #[test]
    fn cancelling_parallel_branches_do_not_yield_nan() {
        let mut circuit = Circuit::new("R | R").unwrap();
        circuit.set_components([("R1", 1.0), ("R2", -1.0)]).unwrap();
        let z = circuit.evaluate(1.0).unwrap();
        assert!(!z.re.is_nan() && !z.im.is_nan());
        assert!(z.re.is_infinite());

        let mut series = Circuit::new("R - (R | R)").unwrap();
        series.set_components([("R2", 2.0), ("R3", -2.0)]).unwrap();
        assert!(series.evaluate(1.0).unwrap().re.is_infinite());
    }

    #[test]
    fn rejects_negative_and_nan_frequencies() {
        let circuit = Circuit::new("R").unwrap();
        assert_eq!(circuit.evaluate(-1.0), Err(CircuitError::InvalidFrequency(-1.0)));
        assert!(matches!(
            circuit.evaluate(f64::NAN),
            Err(CircuitError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn sweep_matches_pointwise_evaluation() {
        let mut circuit = Circuit::new("R - (R | C)").unwrap();
        circuit
            .set_components([("R1", 20.0), ("R2", 100.0), ("C1", 1.0e-3)])
            .unwrap();
        let freqs = [0.1, 1.0, 10.0, 100.0];
        let sweep = circuit.evaluate_sweep(&freqs).unwrap();
        assert_eq!(sweep.len(), freqs.len());
        for (f, z) in freqs.iter().zip(&sweep) {
            assert_eq!(*z, circuit.evaluate(*f).unwrap());
        }
        assert!(sweep[0].re > sweep[3].re);
    }

    #[test]
    fn capacitor_blocks_dc_in_parallel() {
        let mut circuit = Circuit::new("R | C").unwrap();
        circuit.set_component("R1", 42.0).unwrap();
        let z = circuit.evaluate(0.0).unwrap();
        assert_relative_eq!(z.re, 42.0);
        assert_relative_eq!(z.im, 0.0);
    }

    #[test]
    fn precedence_mode_changes_topology() {
        let grouped = Circuit::new("R | R - R").unwrap();
        let ranked = Circuit::with_config(
            "R | R - R",
            ParserConfig::new().with_precedence(PrecedenceMode::Ranked),
        )
        .unwrap();
        // R1 | (R2 - R3) versus (R1 | R2) - R3
        assert_relative_eq!(grouped.evaluate(1.0).unwrap().re, 2.0 / 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(ranked.evaluate(1.0).unwrap().re, 1.5, epsilon = 1.0e-12);
    }
}
