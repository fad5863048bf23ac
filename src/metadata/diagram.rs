use super::*;

/// Tables, their columns and the relationships between them, for ER rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiagram {
    pub tables: Vec<Table>,
    pub relationships: Vec<ForeignKey>,
}

pub fn describe_schema_blocking(path: &Path) -> Result<SchemaDiagram> {
    let conn = open_read_only(path)?;
    let mut diagram = SchemaDiagram::default();
    for (name, _) in user_tables(&conn)? {
        diagram.relationships.extend(foreign_keys(&conn, &name)?);
        diagram.tables.push(Table::new(&name, table_columns(&conn, &name)?));
    }
    Ok(diagram)
}

pub async fn describe_schema(path: impl Into<PathBuf>) -> Result<SchemaDiagram> {
    let path = path.into();
    blocking(move || describe_schema_blocking(&path)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use serde_json::json;

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn describes_tables_and_relationships(ctx: &mut TempDatabase) -> Result {
        let diagram = describe_schema(ctx.path()).await?;
        assert_eq!(
            serde_json::to_value(&diagram)?,
            json!({
                "tables": [
                    { "name": "users", "columns": [
                        { "name": "id", "type": "INTEGER", "pk": true },
                        { "name": "name", "type": "TEXT", "pk": false },
                        { "name": "email", "type": "TEXT", "pk": false },
                    ]},
                    { "name": "orders", "columns": [
                        { "name": "id", "type": "INTEGER", "pk": true },
                        { "name": "user_id", "type": "INTEGER", "pk": false },
                        { "name": "total", "type": "REAL", "pk": false },
                        { "name": "note", "type": "TEXT", "pk": false },
                    ]},
                ],
                "relationships": [
                    { "from_table": "orders", "from_column": "user_id", "to_table": "users", "to_column": "id" },
                ],
            })
        );
        Ok(())
    }

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn untyped_columns_read_as_text(ctx: &mut TempDatabase) -> Result {
        ctx.seed("CREATE TABLE loose (a, b BLOB);");
        let diagram = describe_schema(ctx.path()).await?;
        let loose = diagram.tables.iter().find(|t| t.name == "loose").expect("table");
        assert_eq!(loose.columns[0].data_type, "TEXT");
        assert_eq!(loose.columns[1].data_type, "BLOB");
        Ok(())
    }
}
