use crate::*;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_context::AsyncTestContext;
pub use test_context::test_context;

pub const USERS_DDL: &str =
    "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, email TEXT)";
pub const ORDERS_DDL: &str = "CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER REFERENCES users(id), total REAL, note TEXT)";

/// A throwaway evidence file seeded with `users` and `orders`.
pub struct TempDatabase {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempDatabase {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run setup statements through a writable connection.
    pub fn seed(&self, sql: &str) {
        Connection::open(&self.path)
            .and_then(|conn| conn.execute_batch(sql))
            .expect("Failed to seed test database");
    }

    fn fixture() -> String {
        format!(
            "{USERS_DDL};
             {ORDERS_DDL};
             INSERT INTO users VALUES (1, 'alice', 'alice@example.com'), (2, 'bob', NULL);
             INSERT INTO orders VALUES (1, 1, 9.5, 'first'), (2, 1, 20.0, '{}'), (3, 2, NULL, NULL);",
            "x".repeat(60)
        )
    }
}

impl AsyncTestContext for TempDatabase {
    async fn setup() -> Self {
        crate::testing::common_init();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("evidence.db");
        let database = Self { dir, path };
        database.seed(&Self::fixture());
        database
    }

    async fn teardown(self) {
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove temp database: {e}");
        }
    }
}
