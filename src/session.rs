//! A loaded evidence database and the state tied to its lifetime.
use crate::*;
use sha2::{Digest, Sha256};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

/// SHA-256 of the file at `path`, lowercase hex.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    io::copy(&mut File::open(path)?, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Fail unless `PRAGMA integrity_check` reports `ok` on a read-only connection.
pub fn verify_integrity(path: &Path) -> Result {
    let check = || -> rusqlite::Result<String> {
        open_read_only(path)?.query_row("PRAGMA integrity_check", [], |row| row.get(0))
    };
    let report = check().map_err(|e| Error::InvalidDatabase(ExecutionError::from(e).message))?;
    if report != "ok" {
        return Err(Error::InvalidDatabase(format!(
            "Database integrity check failed: {report}"
        )));
    }
    Ok(())
}

pub struct Session {
    database: PathBuf,
    sha256: String,
    schema: SchemaCache,
    model: Arc<dyn ChatModel>,
}

impl Session {
    /// Verify and hash `database`, then prime its schema contexts.
    pub async fn open(
        database: impl Into<PathBuf>,
        model: Arc<dyn ChatModel>,
        cache_capacity: u64,
    ) -> Result<Self> {
        let database = database.into();
        let sha256 = Self::inspect(&database).await?;
        let schema = SchemaCache::new(cache_capacity);
        schema.reload(&database).await?;
        info!(database = %database.display(), %sha256, "database loaded");
        Ok(Self {
            database,
            sha256,
            schema,
            model,
        })
    }

    async fn inspect(database: &Path) -> Result<String> {
        let path = database.to_path_buf();
        blocking(move || {
            verify_integrity(&path)?;
            sha256_file(&path)
        })
        .await
    }

    /// Re-read the file after it was replaced on disk.
    pub async fn reload(&mut self) -> Result {
        self.sha256 = Self::inspect(&self.database).await?;
        self.schema.reload(&self.database).await
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Evidence hash taken when the file was (re)loaded.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub async fn schema_context(&self, include_samples: bool) -> Result<Arc<SchemaContext>> {
        self.schema.get(&self.database, include_samples).await
    }

    pub async fn system_prompt(&self) -> Result<String> {
        Ok(system_prompt(&*self.schema_context(true).await?))
    }

    pub async fn run(&self, sql: &str) -> QueryOutcome {
        guarded_query(&self.database, sql, &self.schema, self.model.as_ref()).await
    }

    pub async fn diagram(&self) -> Result<SchemaDiagram> {
        describe_schema(&self.database).await
    }

    pub async fn search(&self, term: &str, case_sensitive: bool) -> Result<SearchReport> {
        search_all_tables(&self.database, term, case_sensitive).await
    }
}
