//! SQL keywords the read-only validator reasons about.
//!
//! Two groups live here:
//! - entry points: the only statement openers a read-only session accepts;
//! - blocklisted keywords: anything that writes, changes schema, changes
//!   transactions or touches other database files.
//!
//! Keywords are matched against *upper-cased* words via `from_upper`; the caller
//! upper-cases once per word.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    With,
    Explain,
    Pragma,
    Drop,
    Delete,
    Insert,
    Update,
    Alter,
    Truncate,
    Exec,
    Grant,
    Revoke,
    Create,
    Attach,
    Detach,
    Replace,
    Vacuum,
    Savepoint,
    Release,
    Reindex,
}

impl Keyword {
    /// Statement openers allowed in a read-only session, in reporting order.
    pub const ENTRY_POINTS: [Self; 4] = [
        Keyword::Select,
        Keyword::With,
        Keyword::Explain,
        Keyword::Pragma,
    ];

    /// Keywords that must never appear as code, in reporting order.
    pub const FORBIDDEN: [Self; 17] = [
        Keyword::Drop,
        Keyword::Delete,
        Keyword::Insert,
        Keyword::Update,
        Keyword::Alter,
        Keyword::Truncate,
        Keyword::Exec,
        Keyword::Grant,
        Keyword::Revoke,
        Keyword::Create,
        Keyword::Attach,
        Keyword::Detach,
        Keyword::Replace,
        Keyword::Vacuum,
        Keyword::Savepoint,
        Keyword::Release,
        Keyword::Reindex,
    ];

    /// Attempt to classify an *upper‑cased* word into a `Keyword`.
    pub fn from_upper(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "SELECT" => Select,
            "WITH" => With,
            "EXPLAIN" => Explain,
            "PRAGMA" => Pragma,
            "DROP" => Drop,
            "DELETE" => Delete,
            "INSERT" => Insert,
            "UPDATE" => Update,
            "ALTER" => Alter,
            "TRUNCATE" => Truncate,
            "EXEC" => Exec,
            "GRANT" => Grant,
            "REVOKE" => Revoke,
            "CREATE" => Create,
            "ATTACH" => Attach,
            "DETACH" => Detach,
            "REPLACE" => Replace,
            "VACUUM" => Vacuum,
            "SAVEPOINT" => Savepoint,
            "RELEASE" => Release,
            "REINDEX" => Reindex,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical upper-case spelling.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "SELECT",
            With => "WITH",
            Explain => "EXPLAIN",
            Pragma => "PRAGMA",
            Drop => "DROP",
            Delete => "DELETE",
            Insert => "INSERT",
            Update => "UPDATE",
            Alter => "ALTER",
            Truncate => "TRUNCATE",
            Exec => "EXEC",
            Grant => "GRANT",
            Revoke => "REVOKE",
            Create => "CREATE",
            Attach => "ATTACH",
            Detach => "DETACH",
            Replace => "REPLACE",
            Vacuum => "VACUUM",
            Savepoint => "SAVEPOINT",
            Release => "RELEASE",
            Reindex => "REINDEX",
        }
    }

    pub fn is_forbidden(self) -> bool {
        Self::FORBIDDEN.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
