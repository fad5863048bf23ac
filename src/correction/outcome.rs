use crate::*;
use serde_json::{Value as Json, json};

/// Why a correction could not rescue a failed statement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorrectionUnavailable {
    #[error("LLM did not return corrected SQL")]
    NoSqlBlock,
    #[error("Corrected SQL failed validation: {0}")]
    Rejected(Rejection),
    #[error("Corrected SQL failed: {0}")]
    ExecutionFailed(ExecutionError),
    #[error("Schema context unavailable: {0}")]
    Context(String),
    #[error(transparent)]
    Model(LlmError),
}

/// The model's replacement for a failed statement, as it was executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCorrection {
    pub original_sql: String,
    pub corrected_sql: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completed {
    pub result: QueryResult,
    pub correction: Option<AppliedCorrection>,
}

/// A statement that failed and stayed failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// The first execution's error; this is what the analyst sees.
    pub error: ExecutionError,
    pub cause: CorrectionUnavailable,
}

impl Failure {
    pub fn user_message(&self) -> String {
        match &self.cause {
            CorrectionUnavailable::Model(e) if e.is_transport() => e.to_string(),
            _ => format!("SQL Error: {}", self.error),
        }
    }
}

/// How one analyst statement ended.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Completed(Completed),
    Rejected(Rejection),
    Failed(Failure),
}

impl QueryOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, QueryOutcome::Completed(_))
    }

    /// HTTP-style status: 200, 403 for a rejection, 500 for a failure.
    pub fn status(&self) -> u16 {
        match self {
            QueryOutcome::Completed(_) => 200,
            QueryOutcome::Rejected(_) => 403,
            QueryOutcome::Failed(_) => 500,
        }
    }

    pub fn to_response(&self) -> Json {
        match self {
            QueryOutcome::Completed(Completed { result, correction }) => {
                let mut body = json!({
                    "response": format!("Found {} results.", result.len()),
                    "query_results": result.rows,
                    "truncated": result.truncated,
                });
                if let Some(fix) = correction {
                    body["retried"] = json!(true);
                    body["original_sql"] = json!(fix.original_sql);
                    body["corrected_sql"] = json!(fix.corrected_sql);
                }
                body
            }
            QueryOutcome::Rejected(rejection) => json!({ "error": rejection.to_string() }),
            QueryOutcome::Failed(failure) => json!({ "error": failure.user_message() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn failure(cause: CorrectionUnavailable) -> Failure {
        Failure {
            error: ExecutionError::new("no such column: nmae"),
            cause,
        }
    }

    #[rstest]
    #[case(CorrectionUnavailable::NoSqlBlock)]
    #[case(CorrectionUnavailable::Rejected(Rejection::MultipleStatements))]
    #[case(CorrectionUnavailable::ExecutionFailed(ExecutionError::new("no such table: x")))]
    #[case(CorrectionUnavailable::Context("gone".into()))]
    #[case(CorrectionUnavailable::Model(LlmError::Status { provider: Provider::Ollama, status: 500 }))]
    fn surfaces_original_error(#[case] cause: CorrectionUnavailable) {
        assert_eq!(failure(cause).user_message(), "SQL Error: no such column: nmae");
    }

    #[rstest]
    #[case(LlmError::Timeout { provider: Provider::Ollama }, "Error: Ollama request timed out. Is Ollama running? (ollama serve)")]
    #[case(LlmError::Unreachable { provider: Provider::LmStudio }, "Error: Cannot connect to LM Studio. Is the server running at http://localhost:1234?")]
    fn transport_failures_name_the_provider(#[case] error: LlmError, #[case] message: &str) {
        assert_eq!(failure(CorrectionUnavailable::Model(error)).user_message(), message);
    }

    #[test]
    fn responses() {
        let rejected = QueryOutcome::Rejected(Rejection::IncompleteCte);
        assert_eq!(rejected.status(), 403);
        assert_eq!(
            rejected.to_response(),
            json!({ "error": "CTE (WITH clause) must contain a SELECT statement." })
        );

        let completed = QueryOutcome::Completed(Completed {
            result: QueryResult::default(),
            correction: Some(AppliedCorrection {
                original_sql: "SELECT nmae FROM users".into(),
                corrected_sql: "SELECT name FROM users".into(),
            }),
        });
        assert_eq!(completed.status(), 200);
        assert_eq!(
            completed.to_response(),
            json!({
                "response": "Found 0 results.",
                "query_results": [],
                "truncated": false,
                "retried": true,
                "original_sql": "SELECT nmae FROM users",
                "corrected_sql": "SELECT name FROM users",
            })
        );
    }
}
