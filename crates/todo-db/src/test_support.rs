//! Shared test utilities for todo-db unit tests.

use libsql::Connection;
use uuid::Uuid;

use todo_core::requests::TaskCreate;

use crate::repos::task::TaskDao;
use crate::updates::task::TaskUpdateBuilder;
use crate::{Session, TodoDb};

/// Fresh in-memory database with migrations applied.
pub async fn test_db() -> TodoDb {
    TodoDb::open_local(":memory:").await.unwrap()
}

/// In-memory database plus one session on it. Keep the handle alive for the
/// duration of the test.
pub async fn test_session() -> (TodoDb, Session) {
    let db = test_db().await;
    let session = db.session().await.unwrap();
    (db, session)
}

/// Move a task's `created_at` `secs` seconds into the past.
pub async fn backdate(conn: &Connection, id: Uuid, secs: i64) {
    conn.execute(
        "UPDATE tasks SET created_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?1) WHERE id = ?2",
        libsql::params![format!("-{secs} seconds"), id.to_string()],
    )
    .await
    .unwrap();
}

/// Insert the two reference tasks and return `(regular, deferred)` ids.
///
/// - "Обычная задача": no deadline, created 10 seconds ago.
/// - "Отложенная задача": 10 second deadline, already completed.
pub async fn seed_fixtures(conn: &Connection) -> (Uuid, Uuid) {
    let regular = TaskDao::add_returning_id(conn, &TaskCreate::new("Обычная задача"))
        .await
        .unwrap();
    backdate(conn, regular, 10).await;

    let deferred = TaskDao::add_returning_id(
        conn,
        &TaskCreate::new("Отложенная задача").with_time_to_complete(10),
    )
    .await
    .unwrap();
    TaskDao::partial_update_in_place(
        conn,
        &[crate::repos::task::id_is(deferred)],
        &TaskUpdateBuilder::new().is_completed(true).build(),
    )
    .await
    .unwrap();

    (regular, deferred)
}
