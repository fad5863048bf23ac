use crate::*;
use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Upper bound on rows returned by one statement.
pub const MAX_RESULT_ROWS: usize = 2000;

/// A database engine failure, carrying the engine's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("{message}")]
pub struct ExecutionError {
    #[serde(rename = "errorMessage")]
    pub message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for ExecutionError {
    fn from(value: rusqlite::Error) -> Self {
        let message = match value {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => msg,
            rusqlite::Error::SqlInputError { msg, .. } => msg,
            other => other.to_string(),
        };
        Self { message }
    }
}

/// Open `path` read-only with `query_only` set and the forensic functions installed.
///
/// Both layers hold even for statements that slipped past validation.
pub fn open_read_only(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.pragma_update(None, "query_only", true)?;
    register_forensic_functions(&conn)?;
    Ok(conn)
}

/// Surrounding whitespace and at most one trailing `;` removed.
fn trim_statement(sql: &str) -> &str {
    let sql = sql.trim();
    sql.strip_suffix(';').unwrap_or(sql).trim_end()
}

/// Run one statement on a fresh read-only connection.
pub fn execute_blocking(path: &Path, sql: &str) -> Result<QueryResult, ExecutionError> {
    let conn = open_read_only(path)?;
    let mut stmt = conn.prepare(trim_statement(sql))?;
    let columns: Arc<[String]> = stmt.column_names().into_iter().map(String::from).collect();

    let mut result = QueryResult::default();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        if result.rows.len() == MAX_RESULT_ROWS {
            result.truncated = true;
            break;
        }
        let values = (0..columns.len())
            .map(|i| row.get_ref(i).map(Value::from))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        result.rows.push(Record::new(Arc::clone(&columns), values));
    }
    Ok(result)
}

/// [`execute_blocking`] on tokio's blocking pool.
pub async fn execute(
    path: impl Into<PathBuf>,
    sql: impl Into<String>,
) -> Result<QueryResult, ExecutionError> {
    let (path, sql) = (path.into(), sql.into());
    let outcome = tokio::task::spawn_blocking(move || execute_blocking(&path, &sql))
        .await
        .unwrap_or_else(|e| Err(ExecutionError::new(format!("query task failed: {e}"))));

    match &outcome {
        Ok(result) => debug!(rows = result.len(), truncated = result.truncated, "query executed"),
        Err(e) => warn!("query failed: {e}"),
    }
    outcome
}
