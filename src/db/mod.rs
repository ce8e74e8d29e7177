//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, embedded migration support, and per-connection
//! pragma configuration for the SQLite database.

pub mod model;
pub mod schema;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::config::DatabaseConfig;
use crate::error::{Result, StoreError};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Create a connection pool for the given database settings.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(settings: &DatabaseConfig) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(&settings.path);
    let pool = Pool::builder()
        .max_size(settings.max_connections)
        .build(manager)
        .map_err(|e| StoreError::Connection(e.to_string()))?;
    Ok(pool)
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Database(e.to_string()))?;
    Ok(())
}

/// Apply per-connection pragmas before using a pooled connection for writes.
///
/// SQLite only enforces foreign keys when the pragma is set on the
/// connection, and the intake transaction relies on that enforcement.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_connection(conn: &mut SqliteConnection, busy_timeout_ms: u32) -> Result<()> {
    diesel::sql_query(format!("PRAGMA busy_timeout={busy_timeout_ms}"))
        .execute(conn)
        .map_err(StoreError::from)?;
    diesel::sql_query("PRAGMA foreign_keys=ON")
        .execute(conn)
        .map_err(StoreError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    fn memory_settings() -> DatabaseConfig {
        DatabaseConfig {
            path: ":memory:".into(),
            max_connections: 1,
            busy_timeout_ms: 5000,
        }
    }

    #[test]
    fn create_pool_with_memory_db() {
        let pool = create_pool(&memory_settings());
        assert!(pool.is_ok());
    }

    #[test]
    fn run_migrations_creates_tables() {
        let pool = create_pool(&memory_settings()).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        for expected in [
            "appointments",
            "counselors",
            "persons",
            "referrals",
            "self_assessments",
            "students",
        ] {
            assert!(tables.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let pool = create_pool(&memory_settings()).unwrap();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }

    #[test]
    fn configure_connection_enables_foreign_keys() {
        let pool = create_pool(&memory_settings()).unwrap();
        let mut conn = pool.get().unwrap();
        configure_connection(&mut conn, 5000).unwrap();

        let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(row.foreign_keys, 1);
    }

    #[derive(diesel::QueryableByName)]
    struct ForeignKeysPragma {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }
}
