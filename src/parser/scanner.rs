//! Single-pass scanner turning circuit notation into tokens.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;

use super::token::{Token, TokenKind};
use super::ParseError;

/// Scanner state for one source string.
///
/// Occurrence counters are owned by the scanner, so each parse numbers its
/// components from 1.
///
/// Any ASCII whitespace separates tokens, not just spaces: tabs, newlines and
/// carriage returns are skipped. Other non-alphabetic characters are
/// [`ParseError::UnknownToken`].
pub struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    counters: HashMap<&'a str, usize>,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            counters: HashMap::new(),
            tokens: Vec::new(),
        }
    }

    /// Scans the whole source. The returned sequence always ends with
    /// [`TokenKind::EndOfInput`].
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some((offset, character)) = self.chars.next() {
            self.scan_token(offset, character)?;
        }
        self.tokens
            .push(Token::new(TokenKind::EndOfInput, "", self.source.len()));
        Ok(self.tokens)
    }

    fn scan_token(&mut self, offset: usize, character: char) -> Result<(), ParseError> {
        let kind = match character {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '-' => TokenKind::Dash,
            '|' => TokenKind::Pipe,
            c if c.is_ascii_whitespace() => return Ok(()),
            c if c.is_alphabetic() => {
                self.scan_component(offset);
                return Ok(());
            }
            c => {
                return Err(ParseError::UnknownToken {
                    character: c,
                    offset,
                })
            }
        };
        let end = offset + character.len_utf8();
        self.tokens
            .push(Token::new(kind, &self.source[offset..end], offset));
        Ok(())
    }

    fn scan_component(&mut self, start: usize) {
        let source = self.source;
        let mut end = source.len();
        while let Some(&(idx, c)) = self.chars.peek() {
            if !c.is_alphabetic() {
                end = idx;
                break;
            }
            self.chars.next();
        }
        let name = &source[start..end];
        let count = self.counters.entry(name).or_insert(0);
        *count += 1;
        let literal = format!("{name}{count}");
        tracing::trace!(name, %literal, offset = start, "scanned component");
        self.tokens.push(Token::new(
            TokenKind::Component {
                literal,
                component: None,
            },
            name,
            start,
        ));
    }
}
