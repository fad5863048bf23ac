use super::*;
use rusqlite::types::ValueRef;

/// Rows sampled per table when samples are requested.
pub const SAMPLE_ROWS: usize = 3;
/// Sampled values longer than this many characters are cut and suffixed with `...`.
pub const SAMPLE_VALUE_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRows {
    pub columns: Vec<String>,
    /// Cells already rendered for the prompt.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContext {
    pub name: String,
    pub ddl: Option<String>,
    pub foreign_keys: Vec<ForeignKey>,
    pub sample: Option<SampleRows>,
}

/// Schema description handed to the model, built once per database load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaContext {
    pub tables: Vec<TableContext>,
    pub include_samples: bool,
}

impl SchemaContext {
    pub fn table(&self, name: &str) -> Option<&TableContext> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl Display for SchemaContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = vec!["Database Schema:\n".to_string()];
        for table in &self.tables {
            if let Some(ddl) = &table.ddl {
                lines.push(format!("{ddl};\n"));
            }
            if !table.foreign_keys.is_empty() {
                lines.extend(table.foreign_keys.iter().map(|fk| format!("  -- FK: {fk}")));
                lines.push(String::new());
            }
            if let Some(sample) = &table.sample {
                lines.push(format!(
                    "-- {} sample ({}):",
                    table.name,
                    sample.columns.join(" | ")
                ));
                lines.extend(sample.rows.iter().map(|row| row.join("|")));
                lines.push(String::new());
            }
        }
        f.write_str(&lines.join("\n"))
    }
}

/// A sampled value as it appears in the prompt.
fn sample_cell(value: ValueRef<'_>) -> String {
    let Some(text) = display_value(value) else {
        return "NULL".to_string();
    };
    if text.chars().count() > SAMPLE_VALUE_CHARS {
        let cut: String = text.chars().take(SAMPLE_VALUE_CHARS).collect();
        format!("{cut}...")
    } else {
        text
    }
}

fn sample_rows(conn: &Connection, table: &str) -> rusqlite::Result<Option<SampleRows>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT * FROM {} LIMIT {SAMPLE_ROWS}",
        quote_identifier(table)
    ))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();
    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        rows.push(
            (0..width)
                .map(|i| row.get_ref(i).map(sample_cell))
                .collect::<rusqlite::Result<Vec<_>>>()?,
        );
    }
    Ok((!rows.is_empty()).then_some(SampleRows { columns, rows }))
}

/// Describe every user table of the database at `path`.
///
/// A table whose sample cannot be read is described without one.
pub fn build_schema_context_blocking(path: &Path, include_samples: bool) -> Result<SchemaContext> {
    let conn = open_read_only(path)?;
    let mut tables = Vec::new();
    for (name, ddl) in user_tables(&conn)? {
        let foreign_keys = foreign_keys(&conn, &name)?;
        let sample = if include_samples {
            sample_rows(&conn, &name).unwrap_or_else(|e| {
                warn!(table = %name, "skipping sample rows: {e}");
                None
            })
        } else {
            None
        };
        tables.push(TableContext {
            name,
            ddl,
            foreign_keys,
            sample,
        });
    }
    debug!(tables = tables.len(), include_samples, "schema context built");
    Ok(SchemaContext {
        tables,
        include_samples,
    })
}

pub async fn build_schema_context(path: impl Into<PathBuf>, include_samples: bool) -> Result<SchemaContext> {
    let path = path.into();
    blocking(move || build_schema_context_blocking(&path, include_samples)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn renders_ddl_keys_and_samples(ctx: &mut TempDatabase) -> Result {
        let text = build_schema_context(ctx.path(), true).await?.to_string();
        let expected = [
            "Database Schema:\n",
            &format!("{USERS_DDL};\n"),
            "-- users sample (id | name | email):",
            "1|alice|alice@example.com",
            "2|bob|NULL",
            "",
            &format!("{ORDERS_DDL};\n"),
            "  -- FK: orders.user_id → users.id",
            "",
            "-- orders sample (id | user_id | total | note):",
            "1|1|9.5|first",
            &format!("2|1|20.0|{}...", "x".repeat(SAMPLE_VALUE_CHARS)),
            "3|2|NULL|NULL",
            "",
        ]
        .join("\n");
        assert_eq!(text, expected);
        Ok(())
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn omits_samples_for_correction_prompts(ctx: &mut TempDatabase) -> Result {
        let context = build_schema_context(ctx.path(), false).await?;
        assert!(context.tables.iter().all(|t| t.sample.is_none()));
        let text = context.to_string();
        assert!(text.starts_with("Database Schema:\n"));
        assert!(text.contains("  -- FK: orders.user_id → users.id"));
        assert!(!text.contains("sample"));
        Ok(())
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn samples_at_most_three_rows(ctx: &mut TempDatabase) -> Result {
        ctx.seed(
            "CREATE TABLE log (line TEXT);
             INSERT INTO log VALUES ('a'), ('b'), ('c'), ('d');",
        );
        let context = build_schema_context(ctx.path(), true).await?;
        let sample = context.table("log").and_then(|t| t.sample.as_ref()).expect("sample");
        assert_eq!(sample.rows.len(), SAMPLE_ROWS);
        Ok(())
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn empty_tables_have_no_sample(ctx: &mut TempDatabase) -> Result {
        ctx.seed("CREATE TABLE \"odd name\" (x);");
        let context = build_schema_context(ctx.path(), true).await?;
        let table = context.table("odd name").expect("table");
        assert!(table.sample.is_none());
        assert_eq!(table.ddl.as_deref(), Some("CREATE TABLE \"odd name\" (x)"));
        Ok(())
    }

    #[test]
    fn renders_sample_cells() {
        assert_eq!(sample_cell(ValueRef::Null), "NULL");
        assert_eq!(sample_cell(ValueRef::Integer(7)), "7");

        let exact = "x".repeat(SAMPLE_VALUE_CHARS);
        assert_eq!(sample_cell(ValueRef::Text(exact.as_bytes())), exact);

        let wide = "é".repeat(SAMPLE_VALUE_CHARS + 1);
        let cut = format!("{}...", "é".repeat(SAMPLE_VALUE_CHARS));
        assert_eq!(sample_cell(ValueRef::Text(wide.as_bytes())), cut);
    }
}
