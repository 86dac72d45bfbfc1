//! Circuit notation parser.
//!
//! Turns strings such as `R - (C | R)` into a [`Postfix`] token sequence:
//!
//! ```text
//! expr      := term (('-' | '|') term)*
//! term      := component | '(' expr ')'
//! component := [A-Za-z]+
//! ```
//!
//! `-` joins two sub-circuits in series, `|` in parallel. Every component
//! occurrence gets a numbered literal (`R - R` yields `R1` and `R2`).

/// Parser options.
pub mod config;
/// Tokenizer.
pub mod scanner;
/// Infix to postfix conversion.
pub mod shunting_yard;
/// Token types.
pub mod token;

pub use config::{ParserConfig, PrecedenceMode};
pub use shunting_yard::Postfix;
pub use token::{Operator, Token, TokenKind};

use scanner::Scanner;

/// Errors raised while scanning or reordering circuit notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character outside the notation was found.
    #[error("unknown token {character:?} at offset {offset}")]
    UnknownToken {
        /// Offending character.
        character: char,
        /// Byte offset in the source.
        offset: usize,
    },
    /// A `)` was found with no open `(` before it.
    #[error("parenthesis mismatch: ')' at offset {offset} has no matching '('")]
    UnmatchedClose {
        /// Byte offset of the `)`.
        offset: usize,
    },
    /// A `(` was never closed.
    #[error("mismatched parenthesis: '(' at offset {offset} is never closed")]
    UnclosedParen {
        /// Byte offset of the `(`.
        offset: usize,
    },
}

impl ParseError {
    /// True for unbalanced parentheses.
    #[must_use]
    pub const fn is_paren_error(&self) -> bool {
        matches!(self, Self::UnmatchedClose { .. } | Self::UnclosedParen { .. })
    }

    /// Byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match *self {
            Self::UnknownToken { offset, .. }
            | Self::UnmatchedClose { offset }
            | Self::UnclosedParen { offset } => offset,
        }
    }
}

/// Reusable parser. Holds configuration only; every call starts fresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with `config`.
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `source` into postfix order.
    pub fn parse(&self, source: &str) -> Result<Postfix, ParseError> {
        let _span = tracing::debug_span!("parse", len = source.len()).entered();
        let tokens = Scanner::new(source).scan_tokens()?;
        let postfix = shunting_yard::to_postfix(tokens, self.config.precedence)?;
        tracing::debug!(%postfix, tokens = postfix.len(), "parsed circuit");
        Ok(postfix)
    }

    /// Parses `source` and returns the space-joined postfix lexemes.
    pub fn parse_to_string(&self, source: &str) -> Result<String, ParseError> {
        self.parse(source).map(|postfix| postfix.to_postfix_string())
    }
}

/// Parses `source` with the default configuration.
pub fn parse(source: &str) -> Result<Postfix, ParseError> {
    Parser::new().parse(source)
}
