//! Token kind definitions for the word tokenizer.
//!
//! Each `TokenKind` variant represents a lexical atom found in *stripped* SQL.
//! Anything unrecognized becomes `Other(char)`.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier, number or any non-keyword word, original case preserved.
    Word(String),
    /// Recognized entry-point or blocklisted keyword.
    Keyword(Keyword),
    /// Statement separator `;`.
    Semicolon,
    /// Any other single symbol.
    Other(char),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// The keyword, if this token is one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Returns the word text if this token is a `Word`.
    pub fn word(&self) -> Option<&str> {
        match self {
            TokenKind::Word(s) => Some(s.as_str()),
            _ => None,
        }
    }
}
