use regex::Regex;
use std::sync::LazyLock;

static SQL_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```sql\n([\s\S]*?)\n```").expect("sql fence pattern"));

/// Text of the first ```` ```sql ```` fenced block in a model reply, trimmed.
///
/// Prose, other fences and anything after the first block are ignored.
pub fn extract_sql_block(reply: &str) -> Option<String> {
    SQL_BLOCK
        .captures(reply)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}
