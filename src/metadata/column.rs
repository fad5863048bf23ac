use super::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    /// Declared type; `TEXT` when the column has none.
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(rename = "pk")]
    pub primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, primary_key: bool) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            data_type: if data_type.is_empty() {
                "TEXT".to_string()
            } else {
                data_type
            },
            primary_key,
        }
    }
}

/// Columns of `table` in declaration order.
pub(crate) fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<Column>> {
    let mut stmt = conn.prepare("SELECT name, type, pk FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([table], |row| {
            Ok(Column::new(
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                row.get::<_, i64>(2)? != 0,
            ))
        })?
        .collect();
    columns
}
