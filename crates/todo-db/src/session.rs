//! Scoped database sessions.

use libsql::Connection;
use tokio::sync::OwnedMutexGuard;

/// One unit of database access, held for the duration of a request.
///
/// Sessions over a file database own a dedicated connection that is closed
/// when the session is dropped. Every libSQL connection to `:memory:` opens a
/// separate, empty database, so in-memory sessions take turns holding the
/// database's single connection and release it on drop.
pub struct Session {
    conn: SessionConn,
}

enum SessionConn {
    Owned(Connection),
    Exclusive(OwnedMutexGuard<Connection>),
}

impl Session {
    pub(crate) const fn owned(conn: Connection) -> Self {
        Self {
            conn: SessionConn::Owned(conn),
        }
    }

    pub(crate) const fn exclusive(guard: OwnedMutexGuard<Connection>) -> Self {
        Self {
            conn: SessionConn::Exclusive(guard),
        }
    }

    #[must_use]
    pub fn conn(&self) -> &Connection {
        match &self.conn {
            SessionConn::Owned(conn) => conn,
            SessionConn::Exclusive(guard) => guard,
        }
    }
}
