//! Lenient SQL scanning used by the read-only validator.
//!
//! Nothing in here parses SQL. The validator only needs two views of a candidate
//! statement:
//!
//! Modules:
//! - `strip`      : Removes string literal and comment content so literal data can
//!   never be mistaken for code (`'DELETE'` inside a `WHERE` is just data).
//! - `ident`      : Identifier quoting for the few statements built internally.
//! - `keyword`    : The entry-point and blocklisted keywords the validator cares about.
//! - `token_kind` : Classification of lexical atoms (words, keywords, punctuation).
//! - `token`      : Token struct pairing a `TokenKind` with source span offsets.
//! - `tokenizer`  : Single pass O(n) word tokenizer over *stripped* text.
//!
//! Design Principles:
//! 1. Accept any input, including unterminated strings and comments.
//! 2. When in doubt, suppress text rather than expose it to keyword checks.
//! 3. Word boundaries follow regex `\b` semantics: a word is a run of
//!    alphanumeric characters or `_`.
//!
//! Example:
//! ```rust,ignore
//! use sqlguard::sql::prelude::*;
//!
//! let code = strip_strings_and_comments("SELECT * FROM logs WHERE msg = 'DROP'");
//! let tokens = tokenize(&code);
//! assert!(!tokens.iter().any(|t| t.is_keyword(Keyword::Drop)));
//! ```

pub mod ident;
pub mod keyword;
pub mod strip;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use ident::quote_identifier;
pub use keyword::Keyword;
pub use strip::strip_strings_and_comments;
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;

/// Convenience prelude re‑exporting the most commonly used items.
pub mod prelude {
    pub use super::{Keyword, Token, TokenKind, strip_strings_and_comments, tokenize};
}
