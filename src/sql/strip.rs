/// Scanner state. Comments are skipped eagerly and never need a tracked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Plain,
    InSingleQuote,
    InDoubleQuote,
}

/// Remove the content of string literals, quoted identifiers and comments.
///
/// The output is only meant for keyword and statement-separator analysis, it is
/// never executed. Quote delimiters are dropped along with their content; every
/// other character outside quotes and comments is kept verbatim and in order.
///
/// Behavior:
/// - `--` discards through end of line. The newline itself is kept.
/// - `/*` discards through the next `*/`, or through end of input when unclosed.
/// - `''` inside a single-quoted span and `""` inside a double-quoted span are
///   escaped quotes and do not end the span.
/// - An unterminated string suppresses the remainder of the input.
///
/// Running the function on its own output returns the output unchanged.
pub fn strip_strings_and_comments(sql: &str) -> String {
    let chars: Vec<char> = sql.chars().collect();
    let mut out = String::with_capacity(sql.len());
    let mut state = Scan::Plain;
    let mut i = 0;

    let at = |i: usize, c: char| chars.get(i) == Some(&c);

    while i < chars.len() {
        let c = chars[i];
        match state {
            Scan::Plain => {
                if c == '-' && at(i + 1, '-') {
                    while i < chars.len() && chars[i] != '\n' {
                        i += 1;
                    }
                    continue;
                }
                if c == '/' && at(i + 1, '*') {
                    i += 2;
                    loop {
                        if i + 1 >= chars.len() {
                            // Unclosed block comment swallows the rest.
                            return out;
                        }
                        if chars[i] == '*' && chars[i + 1] == '/' {
                            i += 2;
                            break;
                        }
                        i += 1;
                    }
                    continue;
                }
                match c {
                    '\'' => state = Scan::InSingleQuote,
                    '"' => state = Scan::InDoubleQuote,
                    other => out.push(other),
                }
                i += 1;
            }
            Scan::InSingleQuote | Scan::InDoubleQuote => {
                let quote = if state == Scan::InSingleQuote { '\'' } else { '"' };
                if c == quote {
                    if at(i + 1, quote) {
                        i += 2;
                        continue;
                    }
                    state = Scan::Plain;
                }
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn plain_sql_is_untouched() {
        assert_eq!(strip_strings_and_comments("SELECT * FROM t"), "SELECT * FROM t");
    }

    #[test]
    fn empty_input() {
        assert_eq!(strip_strings_and_comments(""), "");
    }

    #[rstest]
    #[case::single_quoted("SELECT * FROM t WHERE x = 'DROP TABLE'", "SELECT * FROM t WHERE x = ")]
    #[case::double_quoted(r#"SELECT * FROM "DROP TABLE""#, "SELECT * FROM ")]
    #[case::escaped_single("SELECT 'it''s a test' AS x", "SELECT  AS x")]
    #[case::escaped_double(r#"SELECT "say ""hello""" AS x"#, "SELECT  AS x")]
    #[case::line_comment("SELECT 1 -- DROP TABLE x", "SELECT 1 ")]
    #[case::line_comment_keeps_newline("SELECT 1 -- DROP\nFROM t", "SELECT 1 \nFROM t")]
    #[case::block_comment("SELECT * FROM t /* DROP TABLE x */ WHERE 1=1", "SELECT * FROM t  WHERE 1=1")]
    #[case::unclosed_block_comment("SELECT * FROM t /* DROP TABLE x", "SELECT * FROM t ")]
    #[case::block_opener_at_end("SELECT 1 /*", "SELECT 1 ")]
    #[case::block_opener_then_slash("SELECT 1 /*/ DROP", "SELECT 1 ")]
    #[case::empty_block_comment("SELECT/**/1", "SELECT1")]
    #[case::unterminated_string("SELECT 'abc; DROP TABLE t", "SELECT ")]
    #[case::double_quote_inside_single("SELECT 'a\"b' , c", "SELECT  , c")]
    #[case::single_quote_inside_double("SELECT \"a'b\" , c", "SELECT  , c")]
    #[case::comment_marker_inside_string("SELECT '--not a comment' FROM t", "SELECT  FROM t")]
    #[case::block_marker_inside_string("SELECT '/*' FROM t", "SELECT  FROM t")]
    #[case::semicolon_inside_string("SELECT * FROM t WHERE x = 'a;b'", "SELECT * FROM t WHERE x = ")]
    #[case::only_comment("-- just a comment", "")]
    #[case::non_ascii("SELECT 'héllo' AS ñame", "SELECT  AS ñame")]
    fn strips(#[case] sql: &str, #[case] expected: &str) {
        assert_eq!(strip_strings_and_comments(sql), expected);
    }

    #[rstest]
    #[case("SELECT * FROM t WHERE x = 'a''b' /* c */ -- d\n AND \"e\" = 1")]
    #[case("WITH x AS (SELECT '/*') SELECT * FROM x")]
    #[case("SELECT 'unterminated")]
    #[case("PRAGMA table_info(\"users\")")]
    fn stripping_is_idempotent(#[case] sql: &str) {
        let once = strip_strings_and_comments(sql);
        assert_eq!(strip_strings_and_comments(&once), once);
    }

    #[test]
    fn quoted_interior_never_leaks() {
        let sql = "SELECT a, 'secret' , \"hidden\" FROM t -- gone\n/* gone too */";
        let out = strip_strings_and_comments(sql);
        for fragment in ["secret", "hidden", "gone", "'", "\""] {
            assert!(!out.contains(fragment), "{fragment:?} leaked into {out:?}");
        }
        assert_eq!(out, "SELECT a,  ,  FROM t \n");
    }
}
