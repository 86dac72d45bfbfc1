//! Parser configuration.

use super::token::Operator;

/// How operator precedence is applied while converting to postfix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecedenceMode {
    /// Stacked operators are only released by `)` or end of input, so
    /// grouping comes from parentheses alone and chains reduce right to left.
    #[default]
    Grouping,
    /// Textbook ranking: a stacked operator with strictly greater precedence
    /// than the incoming one is emitted first. Equal precedence is not popped.
    Ranked,
}

impl PrecedenceMode {
    /// Whether `stacked` must be emitted before `incoming` is pushed.
    #[must_use]
    pub const fn pops(self, stacked: Operator, incoming: Operator) -> bool {
        match self {
            Self::Grouping => false,
            Self::Ranked => stacked.precedence() > incoming.precedence(),
        }
    }
}

/// Options controlling [`Parser`](super::Parser).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Operator precedence policy.
    pub precedence: PrecedenceMode,
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the precedence policy.
    #[must_use]
    pub const fn with_precedence(mut self, precedence: PrecedenceMode) -> Self {
        self.precedence = precedence;
        self
    }
}
