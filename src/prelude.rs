//! Convenience re-exports for building and evaluating circuits.

pub use crate::circuits::{
    circuit::{Circuit, CircuitError, ComponentValues, Exponents, StackError},
    component::{
        capacitor_impedance, cpe_impedance, inductor_impedance, resistor_impedance,
        warburg_impedance, Component, ComponentKind, Element,
    },
    network::{parallel, series, ConnectionKind},
};
pub use crate::constants::*;
pub use crate::errors::EisError;
pub use crate::math::{CScalar, Scalar, J};
pub use crate::parser::{
    parse, ParseError, Parser, ParserConfig, Postfix, PrecedenceMode, Token, TokenKind,
};
pub use crate::sweep::{bode, impedance_sweep, linear_grid, log_grid, nyquist, FrequencyPoint};
