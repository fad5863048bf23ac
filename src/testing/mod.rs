#![cfg(test)]
crate::reexport!(context);
crate::reexport!(model);
pub use rstest::*;

pub(in crate::testing) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod temp_database_tests {
    use super::{super::*, *};

    #[test_context(TempDatabase)]
    #[tokio::test]
    async fn fixture_is_readable(ctx: &mut TempDatabase) -> Result {
        let conn = open_read_only(ctx.path())?;
        let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;
        let orders: i64 = conn.query_row("SELECT count(*) FROM orders", [], |r| r.get(0))?;
        assert_eq!((users, orders), (2, 3));
        Ok(())
    }

    #[test_context(TempDatabase)]
    #[rstest]
    #[case("first_table")]
    #[case("second_table")]
    #[tokio::test]
    async fn seed_writes_are_visible(ctx: &mut TempDatabase, #[case] name: &str) -> Result {
        ctx.seed(&format!("CREATE TABLE {name} (id INTEGER); INSERT INTO {name} VALUES (7);"));
        let conn = open_read_only(ctx.path())?;
        let id: i64 = conn.query_row(&format!("SELECT id FROM {name}"), [], |r| r.get(0))?;
        assert_eq!(id, 7);
        Ok(())
    }
}
