use derive_more::Display;

/// Pragmas that can change the on-disk format or locking behaviour of a database
/// even though `PRAGMA` statements are otherwise read-leaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum WritePragma {
    #[display("JOURNAL_MODE")]
    JournalMode,
    #[display("LOCKING_MODE")]
    LockingMode,
    #[display("WRITABLE_SCHEMA")]
    WritableSchema,
    #[display("AUTO_VACUUM")]
    AutoVacuum,
    #[display("INCREMENTAL_VACUUM")]
    IncrementalVacuum,
}

impl WritePragma {
    pub const ALL: [Self; 5] = [
        WritePragma::JournalMode,
        WritePragma::LockingMode,
        WritePragma::WritableSchema,
        WritePragma::AutoVacuum,
        WritePragma::IncrementalVacuum,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            WritePragma::JournalMode => "JOURNAL_MODE",
            WritePragma::LockingMode => "LOCKING_MODE",
            WritePragma::WritableSchema => "WRITABLE_SCHEMA",
            WritePragma::AutoVacuum => "AUTO_VACUUM",
            WritePragma::IncrementalVacuum => "INCREMENTAL_VACUUM",
        }
    }

    /// First write-capable pragma named anywhere in `upper` (already upper-cased).
    ///
    /// Plain substring search: `main.journal_mode` and `journal_mode=wal` both count.
    pub fn find_in(upper: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| upper.contains(p.as_str()))
    }
}
