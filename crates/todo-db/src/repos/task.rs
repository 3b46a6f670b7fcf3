//! Task accessor: the `tasks` model plus reads and updates that return the
//! derived completion percentage in the same round trip.

use libsql::{Connection, Value};
use uuid::Uuid;

use todo_core::columns::TaskColumn;
use todo_core::entities::{COMPLETE, Task};
use todo_core::requests::{TaskCreate, TaskUpdate};
use todo_core::responses::TaskRead;

use crate::dao::{
    Changeset, Condition, Dao, Fields, Model, SQL_TARGET, Values, direction, flag, nullable,
    where_clause,
};
use crate::error::DatabaseError;
use crate::helpers::{
    NOW_SQL, get_bool, get_opt_string, get_opt_u32, parse_datetime, parse_uuid,
};

pub type TaskDao = Dao<Task>;

/// Completion percentage evaluated by the store at read time.
///
/// Elapsed time is rounded to whole milliseconds and divided as integers, the
/// same arithmetic as [`todo_core::entities::completion_percentage`].
const COMPLETION_SQL: &str = "CASE \
    WHEN is_completed THEN 100 \
    WHEN time_to_complete IS NULL OR time_to_complete <= 0 THEN 0 \
    ELSE min(100, max(0, \
        CAST(ROUND((julianday('now') - julianday(created_at)) * 86400000.0) AS INTEGER)) \
        * 100 / (time_to_complete * 1000)) \
    END";

fn read_list() -> String {
    format!(
        "{}, {}, {}, {}, {COMPLETION_SQL} AS completion",
        TaskColumn::Id,
        TaskColumn::Title,
        TaskColumn::Description,
        TaskColumn::IsCompleted,
    )
}

fn row_to_task_read(row: &libsql::Row) -> Result<TaskRead, DatabaseError> {
    let completion = row.get::<i64>(4)?.clamp(0, i64::from(COMPLETE));
    Ok(TaskRead {
        id: parse_uuid(&row.get::<String>(0)?)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        is_completed: get_bool(row, 3)?,
        completion: u8::try_from(completion).unwrap_or(COMPLETE),
    })
}

async fn query_task_reads(
    conn: &Connection,
    sql: &str,
    params: Vec<Value>,
) -> Result<Vec<TaskRead>, DatabaseError> {
    tracing::debug!(target: SQL_TARGET, table = Task::TABLE, %sql);
    let mut rows = conn.query(sql, libsql::params_from_iter(params)).await?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next().await? {
        tasks.push(row_to_task_read(&row)?);
    }
    Ok(tasks)
}

/// Case-insensitive (Unicode lowercase) substring match on the title.
#[must_use]
pub fn title_contains(needle: &str) -> Condition {
    Condition::contains(TaskColumn::TitleFolded, &fold(needle))
}

/// Match the task with `id`.
#[must_use]
pub fn id_is(id: Uuid) -> Condition {
    Condition::id(TaskColumn::Id, id)
}

fn fold(text: &str) -> String {
    text.to_lowercase()
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

impl Changeset for TaskCreate {
    fn changes(&self, fields: Fields) -> Values {
        let mut values = Values::new().set(TaskColumn::Title, self.title.clone());
        if self.description.is_some() || fields == Fields::All {
            values.insert(TaskColumn::Description, nullable(self.description.clone()));
        }
        if self.time_to_complete.is_some() || fields == Fields::All {
            values.insert(
                TaskColumn::TimeToComplete,
                nullable(self.time_to_complete.map(i64::from)),
            );
        }
        values
    }
}

impl Changeset for TaskUpdate {
    /// `Fields::All` defaults: description cleared, not completed. `title` has
    /// no default and is written only when provided.
    fn changes(&self, fields: Fields) -> Values {
        let mut values = Values::new();
        if let Some(title) = &self.title {
            values.insert(TaskColumn::Title, title.clone());
        }
        match (&self.description, fields) {
            (Some(description), _) => {
                values.insert(TaskColumn::Description, nullable(description.clone()));
            }
            (None, Fields::All) => values.insert(TaskColumn::Description, Value::Null),
            (None, Fields::Set) => {}
        }
        match (self.is_completed, fields) {
            (Some(done), _) => values.insert(TaskColumn::IsCompleted, flag(done)),
            (None, Fields::All) => values.insert(TaskColumn::IsCompleted, flag(false)),
            (None, Fields::Set) => {}
        }
        values
    }
}

impl Model for Task {
    type Create = TaskCreate;
    type Update = TaskUpdate;

    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        TaskColumn::Id.as_str(),
        TaskColumn::Title.as_str(),
        TaskColumn::Description.as_str(),
        TaskColumn::IsCompleted.as_str(),
        TaskColumn::TimeToComplete.as_str(),
        TaskColumn::CreatedAt.as_str(),
        TaskColumn::UpdatedAt.as_str(),
    ];
    const ON_UPDATE: &'static [(&'static str, &'static str)] =
        &[(TaskColumn::UpdatedAt.as_str(), NOW_SQL)];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: parse_uuid(&row.get::<String>(0)?)?,
            title: row.get(1)?,
            description: get_opt_string(row, 2)?,
            is_completed: get_bool(row, 3)?,
            time_to_complete: get_opt_u32(row, 4)?,
            created_at: parse_datetime(&row.get::<String>(5)?)?,
            updated_at: parse_datetime(&row.get::<String>(6)?)?,
        })
    }

    /// Keep `title_folded` in step with every written title.
    fn derive_columns(values: &mut Values) {
        let folded = match values.get(TaskColumn::Title.as_str()) {
            Some(Value::Text(title)) => fold(title),
            _ => return,
        };
        values.insert(TaskColumn::TitleFolded, folded);
    }
}

// ---------------------------------------------------------------------------
// Composite reads and updates
// ---------------------------------------------------------------------------

impl Dao<Task> {
    /// Tasks matching `conditions` with their completion, ordered by
    /// `created_at`, in one query.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_tasks_data(
        conn: &Connection,
        conditions: &[Condition],
        offset: u32,
        limit: u32,
        asc: bool,
    ) -> Result<Vec<TaskRead>, DatabaseError> {
        let mut params = Vec::new();
        let filter = where_clause(conditions, &mut params);
        params.push(Value::Integer(i64::from(limit)));
        params.push(Value::Integer(i64::from(offset)));
        let dir = direction(asc);
        let sql = format!(
            "SELECT {} FROM {}{filter} ORDER BY {} {dir}, rowid {dir} LIMIT ?{} OFFSET ?{}",
            read_list(),
            Task::TABLE,
            TaskColumn::CreatedAt,
            params.len() - 1,
            params.len(),
        );
        query_task_reads(conn, &sql, params).await
    }

    /// One task with its completion, or `None`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_task_data(
        conn: &Connection,
        id: Uuid,
    ) -> Result<Option<TaskRead>, DatabaseError> {
        let mut params = Vec::new();
        let filter = where_clause(&[id_is(id)], &mut params);
        let sql = format!("SELECT {} FROM {}{filter}", read_list(), Task::TABLE);
        Ok(query_task_reads(conn, &sql, params).await?.into_iter().next())
    }

    /// Full update of one task; returns the updated fields and freshly
    /// computed completion from the same statement, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn update_task_full_data(
        conn: &Connection,
        id: Uuid,
        update: &TaskUpdate,
    ) -> Result<Option<TaskRead>, DatabaseError> {
        Self::update_task_data(conn, id, update.changes(Fields::All)).await
    }

    /// Partial update of one task; like [`Self::update_task_full_data`] but
    /// only provided fields are written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn update_task_partial_data(
        conn: &Connection,
        id: Uuid,
        update: &TaskUpdate,
    ) -> Result<Option<TaskRead>, DatabaseError> {
        Self::update_task_data(conn, id, update.changes(Fields::Set)).await
    }

    async fn update_task_data(
        conn: &Connection,
        id: Uuid,
        values: Values,
    ) -> Result<Option<TaskRead>, DatabaseError> {
        let Some((sql, params)) = Self::update_sql(&[id_is(id)], values) else {
            return Self::get_task_data(conn, id).await;
        };
        let sql = format!("{sql} RETURNING {}", read_list());
        Ok(query_task_reads(conn, &sql, params).await?.into_iter().next())
    }
}
