use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lenient word tokenizer over stripped SQL.
///
/// Behavior:
/// - Skips whitespace.
/// - Aggregates runs of alphanumeric characters and `_` into words, the same
///   boundary regex `\b` uses, so `DROP_TABLE` and `XDROP` are single words.
/// - Upper-cases each word once to attempt keyword classification.
/// - Emits `Semicolon` for `;` and `Other(char)` for every other symbol.
///
/// Never fails: any input yields tokens. O(n) time.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut chars = sql.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if is_word_char(c) {
            let mut end = start + c.len_utf8();
            while let Some(&(idx, cc)) = chars.peek() {
                if !is_word_char(cc) {
                    break;
                }
                end = idx + cc.len_utf8();
                chars.next();
            }
            let text = &sql[start..end];
            let kind = Keyword::from_upper(&text.to_uppercase())
                .map(TokenKind::Keyword)
                .unwrap_or_else(|| TokenKind::Word(text.to_string()));
            out.push(Token::new(kind, start, end));
            continue;
        }

        let kind = match c {
            ';' => TokenKind::Semicolon,
            other => TokenKind::Other(other),
        };
        out.push(Token::new(kind, start, start + c.len_utf8()));
    }

    out
}
