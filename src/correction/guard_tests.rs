#![cfg(test)]
use crate::testing::*;
use crate::*;

const BROKEN: &str = "SELECT nmae FROM users";
const ORIGINAL_ERROR: &str = "SQL Error: no such column: nmae";

fn fenced(sql: &str) -> String {
    format!("Here you go:\n```sql\n{sql}\n```")
}

async fn run(ctx: &TempDatabase, sql: &str, model: &ScriptedModel) -> QueryOutcome {
    guarded_query(ctx.path(), sql, &SchemaCache::new(4), model).await
}

fn failure(outcome: QueryOutcome) -> Failure {
    match outcome {
        QueryOutcome::Failed(failure) => failure,
        other => panic!("expected failure, got {other:?}"),
    }
}

mod first_pass {
    use super::*;

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn success_never_consults_the_model(ctx: &mut TempDatabase) {
        let model = ScriptedModel::new([]);
        let outcome = run(ctx, "SELECT * FROM users", &model).await;
        let QueryOutcome::Completed(completed) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(completed.result.len(), 2);
        assert_eq!(completed.correction, None);
        assert_eq!(model.calls(), 0);
    }

    #[test_context(TempDatabase)]
    #[rstest]
    #[case("DELETE FROM users")]
    #[case("SELECT * FROM users; DROP TABLE users")]
    #[case("PRAGMA journal_mode = DELETE")]
    #[tokio::test]
    async fn rejections_are_not_corrected(ctx: &mut TempDatabase, #[case] sql: &str) {
        let model = ScriptedModel::replying(&fenced("SELECT 1"));
        let outcome = run(ctx, sql, &model).await;
        assert!(matches!(outcome, QueryOutcome::Rejected(_)), "{outcome:?}");
        assert_eq!(outcome.status(), 403);
        assert_eq!(model.calls(), 0);
    }
}

mod correction {
    use super::*;

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn valid_fix_is_executed_once(ctx: &mut TempDatabase) {
        let model = ScriptedModel::replying(&fenced("SELECT name FROM users ORDER BY id"));
        let outcome = run(ctx, BROKEN, &model).await;

        let QueryOutcome::Completed(completed) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(
            completed.correction,
            Some(AppliedCorrection {
                original_sql: BROKEN.into(),
                corrected_sql: "SELECT name FROM users ORDER BY id".into(),
            })
        );
        assert_eq!(completed.result.rows[0].get("name"), Some(&Value::Text("alice".into())));
        assert_eq!(model.calls(), 1);
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn prompt_carries_error_statement_and_schema_without_samples(ctx: &mut TempDatabase) {
        let model = ScriptedModel::replying(&fenced("SELECT name FROM users"));
        run(ctx, BROKEN, &model).await;

        let requests = model.requests();
        let [system, user] = requests[0].as_slice() else {
            panic!("expected system and user turns");
        };
        assert_eq!(system, &ChatMessage::system(CORRECTION_SYSTEM_PROMPT));
        assert_eq!(user.role, Role::User);
        assert!(user.content.starts_with(
            "The following SQL query failed. Check column names against the schema"
        ));
        assert!(user.content.contains("Error: no such column: nmae"));
        assert!(user.content.contains(&format!("```sql\n{BROKEN}\n```")));
        assert!(user.content.contains(USERS_DDL));
        assert!(!user.content.contains("sample"));
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn rejected_fix_surfaces_original_error(ctx: &mut TempDatabase) {
        let model = ScriptedModel::replying(&fenced("DELETE FROM users"));
        let failure = failure(run(ctx, BROKEN, &model).await);
        assert_eq!(failure.user_message(), ORIGINAL_ERROR);
        assert_eq!(
            failure.cause,
            CorrectionUnavailable::Rejected(Rejection::EntryPoint {
                found: Some("DELETE".into())
            })
        );

        let count = execute(ctx.path(), "SELECT count(*) AS n FROM users").await.expect("count");
        assert_eq!(count.rows[0].get("n"), Some(&Value::Integer(2)));
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn reply_without_sql_surfaces_original_error(ctx: &mut TempDatabase) {
        let model = ScriptedModel::replying("I think you meant the name column.");
        let failure = failure(run(ctx, BROKEN, &model).await);
        assert_eq!(failure.cause, CorrectionUnavailable::NoSqlBlock);
        assert_eq!(failure.user_message(), ORIGINAL_ERROR);
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn failing_fix_is_not_retried_again(ctx: &mut TempDatabase) {
        let model = ScriptedModel::new([
            Ok(fenced("SELECT naem FROM users")),
            Ok(fenced("SELECT name FROM users")),
        ]);
        let outcome = run(ctx, BROKEN, &model).await;
        assert_eq!(outcome.status(), 500);
        let failure = failure(outcome);
        assert_eq!(
            failure.cause,
            CorrectionUnavailable::ExecutionFailed(ExecutionError::new("no such column: naem"))
        );
        assert_eq!(failure.user_message(), ORIGINAL_ERROR);
        assert_eq!(model.calls(), 1);
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn timeout_names_the_provider(ctx: &mut TempDatabase) {
        let model = ScriptedModel::failing(LlmError::Timeout {
            provider: Provider::LmStudio,
        });
        let failure = failure(run(ctx, BROKEN, &model).await);
        assert_eq!(
            failure.user_message(),
            "Error: LM Studio request timed out. Is the server running at http://localhost:1234?"
        );
        assert_eq!(failure.error, ExecutionError::new("no such column: nmae"));
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn other_model_errors_surface_original_error(ctx: &mut TempDatabase) {
        let model = ScriptedModel::failing(LlmError::Status {
            provider: Provider::Ollama,
            status: 503,
        });
        let failure = failure(run(ctx, BROKEN, &model).await);
        assert_eq!(failure.user_message(), ORIGINAL_ERROR);
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn works_against_an_http_provider(ctx: &mut TempDatabase) {
        use serde_json::json;
        use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "content": fenced("SELECT count(*) AS n FROM orders") }
            })))
            .expect(1)
            .mount(&server)
            .await;
        let model = HttpChatModel::ollama(&server.uri(), "llama3.2", std::time::Duration::from_secs(5))
            .expect("client");

        let outcome = guarded_query(ctx.path(), BROKEN, &SchemaCache::new(4), &model).await;
        let response = outcome.to_response();
        assert_eq!(response["retried"], json!(true));
        assert_eq!(response["query_results"], json!([{ "n": 3 }]));
        assert_eq!(response["response"], json!("Found 1 results."));
    }
}
