use super::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }
}

/// User tables (`sqlite_%` excluded) with their `CREATE TABLE` text, in catalog order.
pub fn user_tables(conn: &Connection) -> rusqlite::Result<Vec<(String, Option<String>)>> {
    let mut stmt = conn.prepare(
        "SELECT name, sql FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )?;
    let tables = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect();
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn lists_user_tables_only(ctx: &mut TempDatabase) -> Result {
        ctx.seed("CREATE TABLE seq (id INTEGER PRIMARY KEY AUTOINCREMENT);");
        let conn = open_read_only(ctx.path())?;
        let names: Vec<String> = user_tables(&conn)?.into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["users", "orders", "seq"]);
        Ok(())
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn reads_columns_and_keys(ctx: &mut TempDatabase) -> Result {
        let conn = open_read_only(ctx.path())?;
        let orders = Table::new("orders", table_columns(&conn, "orders")?);
        let pk: Vec<&str> = orders.primary_key().map(|c| c.name.as_str()).collect();
        assert_eq!(pk, ["id"]);
        assert_eq!(orders.columns[1], Column::new("user_id", "INTEGER", false));

        let fks = foreign_keys(&conn, "orders")?;
        assert_eq!(fks.len(), 1);
        assert_eq!(fks[0].to_string(), "orders.user_id → users.id");
        Ok(())
    }
}
