use crate::*;
use derive_more::Display;
use itertools::Itertools as _;
use serde::Serialize;

/// Validation rules, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    #[display("entry point")]
    EntryPoint,
    #[display("single statement")]
    SingleStatement,
    #[display("keyword blocklist")]
    KeywordBlocklist,
    #[display("CTE completeness")]
    CteCompleteness,
    #[display("PRAGMA safety")]
    PragmaSafety,
}

/// Why a statement was refused. `Display` is the analyst-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Rejection {
    #[display("{}", entry_point_reason(found.as_deref()))]
    EntryPoint { found: Option<String> },
    #[display("Security Warning: Multiple SQL statements are not allowed.")]
    MultipleStatements,
    #[display("Security Warning: Query contains forbidden keyword '{_0}'.")]
    ForbiddenKeyword(Keyword),
    #[display("CTE (WITH clause) must contain a SELECT statement.")]
    IncompleteCte,
    #[display("Security Warning: PRAGMA {_0} is not allowed (can modify database).")]
    WritePragma(WritePragma),
}

impl Rejection {
    pub fn rule(&self) -> Rule {
        match self {
            Rejection::EntryPoint { .. } => Rule::EntryPoint,
            Rejection::MultipleStatements => Rule::SingleStatement,
            Rejection::ForbiddenKeyword(_) => Rule::KeywordBlocklist,
            Rejection::IncompleteCte => Rule::CteCompleteness,
            Rejection::WritePragma(_) => Rule::PragmaSafety,
        }
    }
}

fn entry_point_reason(found: Option<&str>) -> String {
    let allowed = Keyword::ENTRY_POINTS.iter().join(", ");
    match found {
        Some(word) => format!("Query must start with: {allowed} (found '{word}')"),
        None => format!("Query must start with: {allowed}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(r) => Some(r),
        }
    }

    pub fn report(&self) -> VerdictReport {
        VerdictReport {
            accepted: self.is_accepted(),
            reason: self.rejection().map(ToString::to_string),
        }
    }
}

/// Wire shape of a verdict: `reason` is null exactly when `accepted` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictReport {
    pub accepted: bool,
    pub reason: Option<String>,
}
