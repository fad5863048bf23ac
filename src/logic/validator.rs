//! Read-only statement validator.
//!
//! Rules run in order and the first failure decides the verdict:
//! 1. entry point (`SELECT`, `WITH`, `EXPLAIN`, `PRAGMA`)
//! 2. single statement
//! 3. keyword blocklist
//! 4. CTE completeness
//! 5. PRAGMA safety
//!
//! Rules 2 and 3 look at [`strip_strings_and_comments`] output so that literal data
//! such as `'a;b'` or `'DELETE'` cannot trigger or hide a rejection.
use crate::*;
use std::collections::HashSet;

/// Decide whether `sql` may run against a read-only session.
pub fn validate(sql: &str) -> Verdict {
    match check(sql) {
        Ok(()) => Verdict::Accepted,
        Err(rejection) => {
            debug!(rule = %rejection.rule(), "statement rejected: {rejection}");
            Verdict::Rejected(rejection)
        }
    }
}

fn check(sql: &str) -> std::result::Result<(), Rejection> {
    let first = first_code_line(sql).map(str::to_uppercase).unwrap_or_default();
    let entry = Keyword::ENTRY_POINTS
        .into_iter()
        .find(|kw| first.starts_with(kw.as_str()))
        .ok_or_else(|| Rejection::EntryPoint {
            found: leading_word(&first),
        })?;

    let code = strip_strings_and_comments(sql);
    if has_second_statement(&code) {
        return Err(Rejection::MultipleStatements);
    }

    if let Some(keyword) = forbidden_keyword(&code) {
        return Err(Rejection::ForbiddenKeyword(keyword));
    }

    let upper = sql.trim().to_uppercase();
    match entry {
        Keyword::With if !upper.contains(Keyword::Select.as_str()) => {
            Err(Rejection::IncompleteCte)
        }
        Keyword::Pragma => match WritePragma::find_in(&upper) {
            Some(pragma) => Err(Rejection::WritePragma(pragma)),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

/// First line that is neither blank nor a `--` comment, trimmed.
///
/// Block comments are not skipped, so `/* x */ SELECT 1` has no entry point.
fn first_code_line(sql: &str) -> Option<&str> {
    sql.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("--"))
}

/// Leading word of a line, used to name what a refused statement started with.
fn leading_word(line: &str) -> Option<String> {
    let word: String = line
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!word.is_empty()).then_some(word)
}

/// True when a `;` survives after removing one trailing terminator.
fn has_second_statement(code: &str) -> bool {
    let body = code.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();
    body.contains(';')
}

/// First blocklisted keyword, in blocklist order, used as code.
fn forbidden_keyword(code: &str) -> Option<Keyword> {
    let used: HashSet<Keyword> = tokenize(code)
        .iter()
        .filter_map(Token::keyword)
        .filter(|kw| kw.is_forbidden())
        .collect();
    Keyword::FORBIDDEN.into_iter().find(|kw| used.contains(kw))
}
