//! Token model shared by the scanner and the shunting-yard stage.

use std::fmt;

use crate::circuits::component::ComponentKind;

/// Binary operators of the circuit notation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `-`, series connection.
    Dash,
    /// `|`, parallel connection.
    Pipe,
}

impl Operator {
    /// Binding strength used by ranked precedence: `|` binds tighter than `-`.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Dash => 1,
            Self::Pipe => 2,
        }
    }

    /// Source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Dash => '-',
            Self::Pipe => '|',
        }
    }
}

/// Token classification. Only components carry a literal and a kind.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A named component instance such as `R1`.
    Component {
        /// Disambiguated instance name, unique within one parse.
        literal: String,
        /// Impedance model, unset for unrecognised leading letters.
        component: Option<ComponentKind>,
    },
    /// `-`
    Dash,
    /// `|`
    Pipe,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Sentinel appended by the scanner.
    EndOfInput,
}

/// A lexeme together with its classification and source offset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Classification.
    pub kind: TokenKind,
    /// Source text the token was scanned from.
    pub lexeme: String,
    /// Byte offset of the lexeme in the source.
    pub offset: usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    /// Returns the operator this token denotes, if any.
    #[must_use]
    pub const fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Dash => Some(Operator::Dash),
            TokenKind::Pipe => Some(Operator::Pipe),
            _ => None,
        }
    }

    /// Returns the component literal (e.g. `R2`) for component tokens.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Component { literal, .. } => Some(literal),
            _ => None,
        }
    }

    /// Returns the component kind for recognised component tokens.
    #[must_use]
    pub const fn component_kind(&self) -> Option<ComponentKind> {
        match self.kind {
            TokenKind::Component { component, .. } => component,
            _ => None,
        }
    }

    /// True for component tokens.
    #[must_use]
    pub const fn is_component(&self) -> bool {
        matches!(self.kind, TokenKind::Component { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}
