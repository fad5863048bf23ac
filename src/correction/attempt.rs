use crate::*;
use std::{path::Path, sync::Arc};

/// The single retry granted to a failed statement.
///
/// Created after an execution failure and consumed by [`CorrectionAttempt::run`].
#[derive(Debug, Clone)]
pub struct CorrectionAttempt {
    pub failed_sql: String,
    pub error: ExecutionError,
    /// Schema without samples.
    pub schema: Arc<SchemaContext>,
    pub proposed_sql: Option<String>,
    pub verdict: Option<Verdict>,
}

impl CorrectionAttempt {
    pub fn new(failed_sql: impl Into<String>, error: ExecutionError, schema: Arc<SchemaContext>) -> Self {
        Self {
            failed_sql: failed_sql.into(),
            error,
            schema,
            proposed_sql: None,
            verdict: None,
        }
    }

    pub fn messages(&self) -> [ChatMessage; 2] {
        [
            ChatMessage::system(CORRECTION_SYSTEM_PROMPT),
            ChatMessage::user(correction_prompt(
                &self.error.message,
                &self.failed_sql,
                &self.schema,
            )),
        ]
    }

    /// Pull the replacement out of `reply` and validate it.
    pub fn propose(&mut self, reply: &str) -> Result<&str, CorrectionUnavailable> {
        let proposed = extract_sql_block(reply).ok_or(CorrectionUnavailable::NoSqlBlock)?;
        info!("LLM suggested correction: {proposed}");
        let verdict = validate(&proposed);
        let rejection = verdict.rejection().cloned();
        self.verdict = Some(verdict);
        let proposed = self.proposed_sql.insert(proposed);
        match rejection {
            Some(rejection) => Err(CorrectionUnavailable::Rejected(rejection)),
            None => Ok(proposed.as_str()),
        }
    }

    /// Ask `model` once, then execute the replacement once if it validates.
    pub async fn run(
        mut self,
        database: &Path,
        model: &dyn ChatModel,
    ) -> Result<Completed, CorrectionUnavailable> {
        let reply = model
            .complete(&self.messages())
            .await
            .map_err(CorrectionUnavailable::Model)?;
        let corrected_sql = self.propose(&reply)?.to_string();
        let result = execute(database, corrected_sql.as_str())
            .await
            .map_err(CorrectionUnavailable::ExecutionFailed)?;
        info!(rows = result.len(), "corrected statement executed");
        Ok(Completed {
            result,
            correction: Some(AppliedCorrection {
                original_sql: self.failed_sql,
                corrected_sql,
            }),
        })
    }
}
