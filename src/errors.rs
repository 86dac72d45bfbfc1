//! Shared error types used across submodules.

use thiserror::Error;

use crate::circuits::CircuitError;
use crate::parser::ParseError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum EisError {
    /// Wraps notation errors.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Wraps circuit configuration and evaluation errors.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

impl EisError {
    /// True when the caller supplied bad input, false for a malformed
    /// evaluation state.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        match self {
            Self::Parse(_) => true,
            Self::Circuit(err) => !err.is_internal(),
        }
    }
}

/// Convenience alias for results carrying [`EisError`].
pub type Result<T> = std::result::Result<T, EisError>;
