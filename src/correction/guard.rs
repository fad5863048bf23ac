use crate::*;
use std::path::Path;

/// Validate, execute, and on an engine error try exactly one correction.
///
/// Rejected statements never reach the model.
pub async fn guarded_query(
    database: &Path,
    sql: &str,
    schema: &SchemaCache,
    model: &dyn ChatModel,
) -> QueryOutcome {
    info!("SQL execution attempt: {sql}");
    if let Verdict::Rejected(rejection) = validate(sql) {
        warn!("SQL blocked by validation: {rejection} | Query: {sql}");
        return QueryOutcome::Rejected(rejection);
    }

    let error = match execute(database, sql).await {
        Ok(result) => {
            info!("SQL executed successfully. Rows returned: {}", result.len());
            return QueryOutcome::Completed(Completed {
                result,
                correction: None,
            });
        }
        Err(error) => error,
    };
    warn!("SQL execution error (will attempt retry): {error} | Query: {sql}");

    let corrected = match schema.get(database, false).await {
        Ok(context) => {
            CorrectionAttempt::new(sql, error.clone(), context)
                .run(database, model)
                .await
        }
        Err(e) => Err(CorrectionUnavailable::Context(e.to_string())),
    };
    match corrected {
        Ok(completed) => QueryOutcome::Completed(completed),
        Err(cause) => {
            error!("SQL retry also failed: {cause} | Original query: {sql}");
            QueryOutcome::Failed(Failure { error, cause })
        }
    }
}
