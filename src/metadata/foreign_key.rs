use super::*;

/// One `REFERENCES` clause, as reported by `pragma_foreign_key_list`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    /// `None` when the reference targets the parent's primary key implicitly.
    pub to_column: Option<String>,
}

impl Display for ForeignKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} → {}", self.from_table, self.from_column, self.to_table)?;
        match &self.to_column {
            Some(column) => write!(f, ".{column}"),
            None => Ok(()),
        }
    }
}

pub(crate) fn foreign_keys(conn: &Connection, table: &str) -> rusqlite::Result<Vec<ForeignKey>> {
    let mut stmt = conn.prepare(
        r#"SELECT "table", "from", "to" FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#,
    )?;
    let keys = stmt
        .query_map([table], |row| {
            Ok(ForeignKey {
                from_table: table.to_string(),
                from_column: row.get(1)?,
                to_table: row.get(0)?,
                to_column: row.get(2)?,
            })
        })?
        .collect();
    keys
}
