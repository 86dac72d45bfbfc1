//! Equivalent-circuit components, combination rules, and the evaluator.

/// Circuit model and postfix evaluator.
pub mod circuit;
/// Component kinds and impedance formulas.
pub mod component;
/// Series and parallel combination helpers.
pub mod network;

pub use circuit::{Circuit, CircuitError, ComponentValues, Exponents, StackError};
pub use component::{Component, ComponentKind, Element};
pub use network::{parallel, series, ConnectionKind};
