use crate::*;

/// Instruction sent ahead of every correction request.
pub const CORRECTION_SYSTEM_PROMPT: &str =
    "You are a SQL correction assistant. Output only the corrected SQL in a ```sql code block.";

/// Steering for the model, picked from the engine's error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHint {
    MissingColumn,
    MissingTable,
    Syntax,
    Generic,
}

impl ErrorHint {
    pub fn classify(error: &str) -> Self {
        let error = error.to_uppercase();
        if error.contains("NO SUCH COLUMN") {
            ErrorHint::MissingColumn
        } else if error.contains("NO SUCH TABLE") {
            ErrorHint::MissingTable
        } else if error.contains("SYNTAX ERROR") || error.contains("NEAR") {
            ErrorHint::Syntax
        } else {
            ErrorHint::Generic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorHint::MissingColumn => {
                "Check column names against the schema — the column may be misspelled or belong to a different table."
            }
            ErrorHint::MissingTable => {
                "Check table names against the schema — the table may be misspelled."
            }
            ErrorHint::Syntax => "Fix the SQLite syntax error.",
            ErrorHint::Generic => "Fix the error based on the message below.",
        }
    }
}

pub fn correction_prompt(error: &str, failed_sql: &str, schema: &SchemaContext) -> String {
    let hint = ErrorHint::classify(error).as_str();
    format!(
        "The following SQL query failed. {hint}\n\
         \n\
         Error: {error}\n\
         \n\
         Failed query:\n\
         ```sql\n\
         {failed_sql}\n\
         ```\n\
         \n\
         {schema}\n\
         \n\
         Output ONLY the corrected SQL query in a ```sql code block. No explanation needed."
    )
}

/// System prompt for the analyst conversation: read-only rules, two worked
/// examples, then the schema.
pub fn system_prompt(schema: &SchemaContext) -> String {
    format!(
        r#"You are a SQLite expert assisting a forensic analyst. READ-ONLY environment — never output INSERT, UPDATE, DELETE, DROP, or any modification commands.

Rules:
- Schema-only questions (structure, relationships): respond in plain text, no SQL.
- Data questions: brief explanation (1-2 sentences), then exactly ONE ```sql block. SQLite syntax only.
- Use only tables/columns from the schema below.
- Direct requests ("show me X"): write the query immediately, no confirmation.
- If ambiguous, ask one clarifying question.

Example 1 — Data retrieval:
User: "Show me the 10 most recent entries in the logs table"
Assistant: "I'll query the most recent 10 log entries by timestamp."
```sql
SELECT * FROM logs ORDER BY timestamp DESC LIMIT 10;
```

Example 2 — Structural question:
User: "How are the tables related?"
Assistant: "Based on the schema, **orders** links to **customers** via CustomerId, and **order_items** connects to both **orders** and **products** via foreign keys."

{schema}"#
    )
}
