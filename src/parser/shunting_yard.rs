//! Infix to postfix conversion.
//!
//! Classic operator-stack algorithm: components go straight to the output
//! queue, operators wait on a stack until parentheses, precedence, or the end
//! of input release them.

use std::fmt;

use crate::circuits::component::ComponentKind;

use super::config::PrecedenceMode;
use super::token::{Token, TokenKind};
use super::ParseError;

/// Circuit in postfix order. Never contains parentheses or the end marker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    /// Ordered tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterates over the tokens in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when nothing was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Component literals in postfix order.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(Token::literal)
    }

    /// Space-joined lexemes, e.g. `"A B -"`.
    #[must_use]
    pub fn to_postfix_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.tokens {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Reorders a scanned token stream into postfix form.
pub fn to_postfix(tokens: Vec<Token>, mode: PrecedenceMode) -> Result<Postfix, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Component { .. } => output.push(classify(token)),
            TokenKind::Dash | TokenKind::Pipe => {
                push_operator(token, &mut operators, &mut output, mode);
            }
            TokenKind::LeftParen => operators.push(token),
            TokenKind::RightParen => loop {
                match operators.pop() {
                    Some(top) if top.kind == TokenKind::LeftParen => break,
                    Some(top) => output.push(top),
                    None => return Err(ParseError::UnmatchedClose { offset: token.offset }),
                }
            },
            TokenKind::EndOfInput => break,
        }
    }

    while let Some(top) = operators.pop() {
        if top.kind == TokenKind::LeftParen {
            return Err(ParseError::UnclosedParen { offset: top.offset });
        }
        output.push(top);
    }

    Ok(Postfix { tokens: output })
}

fn push_operator(
    token: Token,
    operators: &mut Vec<Token>,
    output: &mut Vec<Token>,
    mode: PrecedenceMode,
) {
    if let Some(incoming) = token.operator() {
        while let Some(stacked) = operators.last().and_then(Token::operator) {
            if !mode.pops(stacked, incoming) {
                break;
            }
            if let Some(top) = operators.pop() {
                output.push(top);
            }
        }
    }
    operators.push(token);
}

fn classify(mut token: Token) -> Token {
    if let TokenKind::Component { component, .. } = &mut token.kind {
        *component = ComponentKind::from_name(&token.lexeme);
    }
    token
}
