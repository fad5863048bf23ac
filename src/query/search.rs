use crate::*;
use rusqlite::{Connection, types::ValueRef};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Matched values kept per column for display.
pub const SEARCH_PREVIEW_VALUES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableMatches {
    pub total_matches: usize,
    /// Up to [`SEARCH_PREVIEW_VALUES`] distinct matches per column.
    pub columns: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub results: BTreeMap<String, TableMatches>,
    pub total_matches: usize,
    pub tables_with_matches: usize,
}

/// Distinct values of one column containing `term`.
fn column_matches(
    conn: &Connection,
    table: &str,
    column: &str,
    term: &str,
    case_sensitive: bool,
) -> rusqlite::Result<Vec<String>> {
    let (table, column) = (quote_identifier(table), quote_identifier(column));
    let like = format!("%{term}%");
    let mut stmt;
    let mut rows = if case_sensitive {
        // LIKE narrows candidates, GLOB respects case.
        stmt = conn.prepare(&format!(
            "SELECT DISTINCT {column} FROM {table} WHERE {column} LIKE ?1 AND {column} GLOB ?2"
        ))?;
        stmt.query([like, format!("*{term}*")])?
    } else {
        stmt = conn.prepare(&format!(
            "SELECT DISTINCT {column} FROM {table} WHERE {column} LIKE ?1"
        ))?;
        stmt.query([like])?
    };

    let needle = if case_sensitive {
        term.to_string()
    } else {
        term.to_lowercase()
    };
    let mut matched = Vec::new();
    while let Some(row) = rows.next()? {
        let Some(text) = display_value(row.get_ref(0)?) else {
            continue;
        };
        let hit = if case_sensitive {
            text.contains(&needle)
        } else {
            text.to_lowercase().contains(&needle)
        };
        if hit {
            matched.push(text);
        }
    }
    Ok(matched)
}

/// Search every column of every user table for `term`.
///
/// A column that cannot be searched is skipped with a warning.
pub fn search_all_tables_blocking(path: &Path, term: &str, case_sensitive: bool) -> Result<SearchReport> {
    let term = term.trim();
    if term.is_empty() {
        return Err(Error::InvalidInput("Search term is required".into()));
    }

    let conn = open_read_only(path)?;
    let mut report = SearchReport::default();
    for (table, _) in user_tables(&conn)? {
        let mut matches = TableMatches::default();
        for column in table_columns(&conn, &table)? {
            match column_matches(&conn, &table, &column.name, term, case_sensitive) {
                Ok(values) if values.is_empty() => {}
                Ok(mut values) => {
                    matches.total_matches += values.len();
                    values.truncate(SEARCH_PREVIEW_VALUES);
                    matches.columns.insert(column.name, values);
                }
                Err(e) => warn!("Search error in {table}.{}: {e}", column.name),
            }
        }
        if matches.total_matches > 0 {
            report.total_matches += matches.total_matches;
            report.results.insert(table, matches);
        }
    }
    report.tables_with_matches = report.results.len();
    info!(
        "Search complete: {} matches in {} tables",
        report.total_matches, report.tables_with_matches
    );
    Ok(report)
}

pub async fn search_all_tables(
    path: impl Into<PathBuf>,
    term: impl Into<String>,
    case_sensitive: bool,
) -> Result<SearchReport> {
    let (path, term) = (path.into(), term.into());
    blocking(move || search_all_tables_blocking(&path, &term, case_sensitive)).await
}
