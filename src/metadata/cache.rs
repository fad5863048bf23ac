use super::*;
use moka::future::Cache;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SchemaKey {
    database: PathBuf,
    include_samples: bool,
}

impl SchemaKey {
    fn new(database: &Path, include_samples: bool) -> Self {
        Self {
            database: database.to_path_buf(),
            include_samples,
        }
    }
}

/// Schema contexts per (database, include_samples).
///
/// Values are immutable; a reload inserts fresh `Arc`s so readers holding the old
/// context keep a consistent view.
#[derive(Clone)]
pub struct SchemaCache {
    contexts: Cache<SchemaKey, Arc<SchemaContext>>,
}

impl SchemaCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            contexts: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Cached context, built on first use. Concurrent misses share one build.
    pub async fn get(&self, database: &Path, include_samples: bool) -> Result<Arc<SchemaContext>> {
        let path = database.to_path_buf();
        self.contexts
            .try_get_with(SchemaKey::new(database, include_samples), async move {
                build_schema_context(path, include_samples).await.map(Arc::new)
            })
            .await
            .map_err(|e| Error::Schema(e.to_string()))
    }

    /// Rebuild both variants for `database`, replacing whatever was cached.
    ///
    /// Nothing is replaced unless both builds succeed.
    pub async fn reload(&self, database: &Path) -> Result {
        let with_samples = build_schema_context(database, true).await?;
        let without_samples = build_schema_context(database, false).await?;
        self.contexts
            .insert(SchemaKey::new(database, true), Arc::new(with_samples))
            .await;
        self.contexts
            .insert(SchemaKey::new(database, false), Arc::new(without_samples))
            .await;
        info!(database = %database.display(), "schema context reloaded");
        Ok(())
    }

    pub async fn invalidate(&self, database: &Path) {
        for include_samples in [true, false] {
            self.contexts
                .invalidate(&SchemaKey::new(database, include_samples))
                .await;
        }
    }

    pub async fn contains(&self, database: &Path, include_samples: bool) -> bool {
        self.contexts
            .get(&SchemaKey::new(database, include_samples))
            .await
            .is_some()
    }
}
