//! # todo-db
//!
//! libSQL persistence for the Todo List API.
//!
//! - [`dao`]: the generic record access layer (`Dao<M: Model>`)
//! - [`repos::task`]: the task accessor, with completion derived inside queries
//! - [`service`]: `TaskService`, the orchestration used by the HTTP layer
//! - [`scheduler`]: best-effort delayed completion of tasks with a deadline
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod dao;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod scheduler;
pub mod service;
mod session;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use error::DatabaseError;
use libsql::{Builder, Connection};
use todo_config::DatabaseConfig;
use tokio::sync::Mutex;

pub use session::Session;

/// Shared handle to the task database.
///
/// Cheap to clone; every clone opens sessions against the same database.
#[derive(Clone)]
pub struct TodoDb {
    inner: Arc<Inner>,
}

struct Inner {
    db: libsql::Database,
    /// The only connection of an in-memory database, held by one session at a time.
    shared: Option<Arc<Mutex<Connection>>>,
    busy_timeout: Duration,
}

impl TodoDb {
    /// Open a local database at `path` with default settings.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open(&DatabaseConfig {
            path: path.to_string(),
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Open the database described by `config` and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(&config.path).build().await?;
        let in_memory = config.is_in_memory();
        let shared = if in_memory {
            Some(Arc::new(Mutex::new(db.connect()?)))
        } else {
            None
        };

        let todo_db = Self {
            inner: Arc::new(Inner {
                db,
                shared,
                busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            }),
        };

        let session = todo_db.session().await?;
        if !in_memory {
            // Lets readers proceed while a writer holds the lock.
            pragma(session.conn(), "PRAGMA journal_mode = WAL").await?;
        }
        migrations::run_migrations(session.conn()).await?;

        tracing::info!(path = %config.path, "database ready");
        Ok(todo_db)
    }

    /// Acquire a session for one unit of work.
    ///
    /// On an in-memory database this waits until no other session is alive.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a connection cannot be opened or configured.
    pub async fn session(&self) -> Result<Session, DatabaseError> {
        if let Some(shared) = &self.inner.shared {
            return Ok(Session::exclusive(Arc::clone(shared).lock_owned().await));
        }

        let conn = self.inner.db.connect()?;
        let timeout_ms = self.inner.busy_timeout.as_millis();
        pragma(&conn, &format!("PRAGMA busy_timeout = {timeout_ms}")).await?;
        Ok(Session::owned(conn))
    }

    /// Re-run the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        let session = self.session().await?;
        migrations::run_migrations(session.conn()).await
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.inner.shared.is_some()
    }
}

/// Run a PRAGMA that may report its new value as a row.
async fn pragma(conn: &Connection, sql: &str) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query(sql, ())
        .await
        .map_err(|e| DatabaseError::Query(format!("{sql}: {e}")))?;
    while rows.next().await?.is_some() {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    async fn table_exists(conn: &Connection, name: &str) -> bool {
        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type IN ('table', 'index') AND name = ?1",
                [name],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().is_some()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let session = db.session().await.unwrap();
        assert!(table_exists(session.conn(), "tasks").await);
        assert!(table_exists(session.conn(), "idx_tasks_created_at").await);
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn memory_sessions_share_one_database() {
        let db = test_db().await;
        assert!(db.is_in_memory());

        let writer = db.session().await.unwrap();
        writer
            .conn()
            .execute(
                "INSERT INTO tasks (id, title) VALUES ('00000000-0000-0000-0000-000000000001', 't')",
                (),
            )
            .await
            .unwrap();
        drop(writer);

        let reader = db.session().await.unwrap();
        let mut rows = reader
            .conn()
            .query("SELECT COUNT(*) FROM tasks", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn memory_session_is_exclusive_while_alive() {
        let db = test_db().await;
        let held = db.session().await.unwrap();

        let waiting = tokio::time::timeout(Duration::from_millis(50), db.session()).await;
        assert!(waiting.is_err(), "second session acquired while first is alive");

        drop(held);
        let next = tokio::time::timeout(Duration::from_millis(500), db.session()).await;
        assert!(next.is_ok());
    }

    #[tokio::test]
    async fn file_sessions_see_each_others_commits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.db");
        let db = TodoDb::open_local(path.to_str().unwrap()).await.unwrap();
        assert!(!db.is_in_memory());

        let writer = db.session().await.unwrap();
        writer
            .conn()
            .execute(
                "INSERT INTO tasks (id, title) VALUES ('00000000-0000-0000-0000-000000000002', 't')",
                (),
            )
            .await
            .unwrap();
        drop(writer);

        let reader = db.session().await.unwrap();
        let mut rows = reader
            .conn()
            .query("SELECT COUNT(*) FROM tasks", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn store_defaults_fill_timestamps() {
        let db = test_db().await;
        let session = db.session().await.unwrap();
        session
            .conn()
            .execute(
                "INSERT INTO tasks (id, title) VALUES ('00000000-0000-0000-0000-000000000003', 't')",
                (),
            )
            .await
            .unwrap();
        let mut rows = session
            .conn()
            .query("SELECT created_at, is_completed FROM tasks", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        let created_at = helpers::parse_datetime(&row.get::<String>(0).unwrap()).unwrap();
        assert!((chrono::Utc::now() - created_at).num_seconds() < 5);
        assert_eq!(row.get::<i64>(1).unwrap(), 0);
    }
}
