//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use libsql::Connection;

use crate::error::DatabaseError;

/// Initial schema: the `tasks` table and its `created_at` index.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

const MIGRATIONS: &[(&str, &str)] = &[("001_initial", MIGRATION_001)];

/// Run all embedded migrations in sequence.
pub(crate) async fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    for (name, sql) in MIGRATIONS {
        conn.execute_batch(sql)
            .await
            .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
        tracing::debug!(migration = name, "applied");
    }
    Ok(())
}
