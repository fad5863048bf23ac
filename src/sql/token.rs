//! Token model tying a `TokenKind` to its byte span in the scanned text.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// A lexical token with inclusive start and exclusive end byte offsets.
///
/// Offsets refer to the text handed to the tokenizer, which for the validator is
/// the stripped statement, not the raw one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn word(&self) -> Option<&str> {
        self.kind.word()
    }

    pub fn keyword(&self) -> Option<Keyword> {
        self.kind.keyword()
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_delegate_to_kind() {
        let t = Token::new(TokenKind::Keyword(Keyword::Select), 0, 6);
        assert!(t.is_keyword(Keyword::Select));
        assert_eq!(t.keyword(), Some(Keyword::Select));
        assert_eq!((t.start, t.end), (0, 6));

        let w = Token::new(TokenKind::Word("users".into()), 14, 19);
        assert_eq!(w.word(), Some("users"));
    }
}
