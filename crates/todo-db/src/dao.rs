//! Generic record access layer.
//!
//! [`Dao<M>`] provides create, filtered/paged reads, partial and full updates,
//! delete, and count for any [`Model`]. Every operation takes the caller's
//! connection (a session connection or a `libsql::Transaction`, which derefs to
//! one) and issues exactly one statement. Commit is the caller's business.
//!
//! Column names only ever come from `&'static str` constants declared by the
//! model; values are always bound as parameters.

use std::marker::PhantomData;

use libsql::{Connection, Value};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::helpers::{LIKE_ESCAPE, escape_like, parse_uuid};

/// Tracing target of every statement issued through this module.
pub const SQL_TARGET: &str = "todo_db::sql";

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Ordered column/value pairs to write.
#[derive(Debug, Clone, Default)]
pub struct Values(Vec<(&'static str, Value)>);

impl Values {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `column`, replacing an earlier value for the same column.
    #[must_use]
    pub fn set(mut self, column: impl Into<&'static str>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// In-place form of [`Self::set`].
    pub fn insert(&mut self, column: impl Into<&'static str>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    #[must_use]
    pub fn columns(&self) -> Vec<&'static str> {
        self.0.iter().map(|(c, _)| *c).collect()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_parts(self) -> (Vec<&'static str>, Vec<Value>) {
        self.0.into_iter().unzip()
    }
}

/// Bind an optional value, mapping `None` to SQL NULL.
#[must_use]
pub fn nullable<T: Into<Value>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, Into::into)
}

/// Bind a flag as a 0/1 INTEGER.
#[must_use]
pub fn flag(value: bool) -> Value {
    Value::Integer(i64::from(value))
}

// ---------------------------------------------------------------------------
// Changesets
// ---------------------------------------------------------------------------

/// Which fields of a typed input become column writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fields {
    /// Only fields the caller explicitly provided.
    Set,
    /// The full declared field set, with declared defaults for unprovided fields.
    All,
}

/// A typed input that can be rendered as column writes.
pub trait Changeset {
    fn changes(&self, fields: Fields) -> Values;
}

/// Input to a write: a typed changeset or a raw column/value mapping.
pub enum Payload<'a, T> {
    Typed(&'a T),
    Raw(Values),
}

impl<'a, T> From<&'a T> for Payload<'a, T> {
    fn from(input: &'a T) -> Self {
        Self::Typed(input)
    }
}

impl<T> From<Values> for Payload<'_, T> {
    fn from(values: Values) -> Self {
        Self::Raw(values)
    }
}

impl<T: Changeset> Payload<'_, T> {
    fn into_values(self, fields: Fields) -> Values {
        match self {
            Self::Typed(input) => input.changes(fields),
            Self::Raw(values) => values,
        }
    }
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// One predicate; a list of conditions is combined with `AND`.
#[derive(Debug, Clone)]
pub enum Condition {
    Eq(&'static str, Value),
    /// `LIKE` with `\` as escape character. The pattern is used as given.
    Like(&'static str, String),
    IsNull(&'static str),
    IsNotNull(&'static str),
}

impl Condition {
    pub fn eq(column: impl Into<&'static str>, value: impl Into<Value>) -> Self {
        Self::Eq(column.into(), value.into())
    }

    /// Condition matching a row by its UUID primary key.
    pub fn id(column: impl Into<&'static str>, id: Uuid) -> Self {
        Self::Eq(column.into(), Value::Text(id.to_string()))
    }

    /// `column` contains `needle` as a literal substring (wildcards escaped).
    pub fn contains(column: impl Into<&'static str>, needle: &str) -> Self {
        Self::Like(column.into(), format!("%{}%", escape_like(needle)))
    }

    fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Self::Eq(column, value) => {
                params.push(value.clone());
                format!("{column} = ?{}", params.len())
            }
            Self::Like(column, pattern) => {
                params.push(Value::Text(pattern.clone()));
                format!("{column} LIKE ?{} ESCAPE '{LIKE_ESCAPE}'", params.len())
            }
            Self::IsNull(column) => format!("{column} IS NULL"),
            Self::IsNotNull(column) => format!("{column} IS NOT NULL"),
        }
    }
}

/// Render ` WHERE a AND b`, or an empty string for no conditions.
pub(crate) fn where_clause(conditions: &[Condition], params: &mut Vec<Value>) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = conditions.iter().map(|c| c.render(params)).collect();
    format!(" WHERE {}", parts.join(" AND "))
}

/// `ORDER BY` direction keyword.
pub(crate) const fn direction(asc: bool) -> &'static str {
    if asc { "ASC" } else { "DESC" }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// A stored record shape together with its create and update input shapes.
pub trait Model: Sized + Send + Sync {
    type Create: Changeset + Sync;
    type Update: Changeset + Sync;

    const TABLE: &'static str;
    /// UUID primary key column.
    const ID: &'static str = "id";
    /// Columns selected and decoded by [`Model::from_row`], in order.
    const COLUMNS: &'static [&'static str];
    /// `(column, sql_expression)` pairs written by every update.
    const ON_UPDATE: &'static [(&'static str, &'static str)] = &[];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError>;

    /// Fill columns that are derived from other written columns.
    fn derive_columns(_values: &mut Values) {}
}

/// Generic accessor over a [`Model`].
pub struct Dao<M>(PhantomData<M>);

impl<M: Model> Dao<M> {
    fn select_list() -> String {
        M::COLUMNS.join(", ")
    }

    async fn query_all(
        conn: &Connection,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<Vec<M>, DatabaseError> {
        tracing::debug!(target: SQL_TARGET, table = M::TABLE, %sql);
        let mut rows = conn.query(sql, libsql::params_from_iter(params)).await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(M::from_row(&row)?);
        }
        Ok(out)
    }

    async fn query_first(
        conn: &Connection,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<Option<M>, DatabaseError> {
        Ok(Self::query_all(conn, sql, params).await?.into_iter().next())
    }

    fn insert_sql(values: Values, returning: &str) -> (String, Vec<Value>) {
        let (columns, params) = values.into_parts();
        let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {returning}",
            M::TABLE,
            columns.join(", "),
            placeholders.join(", "),
        );
        (sql, params)
    }

    fn prepare_insert(values: Values) -> Values {
        let mut values = values;
        if !values.contains(M::ID) {
            values.insert(M::ID, Value::Text(Uuid::new_v4().to_string()));
        }
        M::derive_columns(&mut values);
        values
    }

    /// Render `UPDATE .. SET .. WHERE ..`, or `None` when there is nothing to set.
    pub(crate) fn update_sql(
        conditions: &[Condition],
        values: Values,
    ) -> Option<(String, Vec<Value>)> {
        let mut values = values;
        M::derive_columns(&mut values);
        if values.is_empty() {
            return None;
        }

        let (columns, mut params) = values.into_parts();
        let mut sets: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect();
        sets.extend(
            M::ON_UPDATE
                .iter()
                .filter(|(column, _)| !columns.contains(column))
                .map(|(column, expr)| format!("{column} = {expr}")),
        );

        let filter = where_clause(conditions, &mut params);
        let sql = format!("UPDATE {} SET {}{filter}", M::TABLE, sets.join(", "));
        Some((sql, params))
    }

    /// Insert one row and return its identifier.
    ///
    /// A typed payload contributes only its explicitly-set fields; a raw
    /// payload is written as given. The id is generated unless supplied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn add_returning_id<'a>(
        conn: &Connection,
        payload: impl Into<Payload<'a, M::Create>>,
    ) -> Result<Uuid, DatabaseError>
    where
        M::Create: 'a,
    {
        let values = Self::prepare_insert(payload.into().into_values(Fields::Set));
        let (sql, params) = Self::insert_sql(values, M::ID);
        tracing::debug!(target: SQL_TARGET, table = M::TABLE, %sql);

        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        parse_uuid(&row.get::<String>(0)?)
    }

    /// Insert one row and return it as stored, store defaults included.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn add<'a>(
        conn: &Connection,
        payload: impl Into<Payload<'a, M::Create>>,
    ) -> Result<M, DatabaseError>
    where
        M::Create: 'a,
    {
        let values = Self::prepare_insert(payload.into().into_values(Fields::Set));
        let (sql, params) = Self::insert_sql(values, &Self::select_list());
        Self::query_first(conn, &sql, params)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// First row matching every condition, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_one_or_none(
        conn: &Connection,
        conditions: &[Condition],
    ) -> Result<Option<M>, DatabaseError> {
        let mut params = Vec::new();
        let filter = where_clause(conditions, &mut params);
        let sql = format!(
            "SELECT {} FROM {}{filter} LIMIT 1",
            Self::select_list(),
            M::TABLE
        );
        Self::query_first(conn, &sql, params).await
    }

    /// Rows matching every condition, sorted by `order_by` and paged.
    ///
    /// Rows with equal sort keys keep insertion order in the requested direction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_all_sorted(
        conn: &Connection,
        conditions: &[Condition],
        order_by: impl Into<&'static str>,
        offset: u32,
        limit: u32,
        asc: bool,
    ) -> Result<Vec<M>, DatabaseError> {
        let mut params = Vec::new();
        let filter = where_clause(conditions, &mut params);
        params.push(Value::Integer(i64::from(limit)));
        params.push(Value::Integer(i64::from(offset)));
        let dir = direction(asc);
        let sql = format!(
            "SELECT {} FROM {}{filter} ORDER BY {} {dir}, rowid {dir} LIMIT ?{} OFFSET ?{}",
            Self::select_list(),
            M::TABLE,
            order_by.into(),
            params.len() - 1,
            params.len(),
        );
        Self::query_all(conn, &sql, params).await
    }

    /// Apply only the explicitly-set fields to matching rows and return the
    /// first updated row, or `None` if nothing matched.
    ///
    /// With nothing to set, no write happens and the current row is returned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn partial_update<'a>(
        conn: &Connection,
        conditions: &[Condition],
        payload: impl Into<Payload<'a, M::Update>>,
    ) -> Result<Option<M>, DatabaseError>
    where
        M::Update: 'a,
    {
        Self::update_returning(conn, conditions, payload.into().into_values(Fields::Set)).await
    }

    /// Apply only the explicitly-set fields to matching rows; return how many
    /// rows were updated (0 when there is nothing to set).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn partial_update_in_place<'a>(
        conn: &Connection,
        conditions: &[Condition],
        payload: impl Into<Payload<'a, M::Update>>,
    ) -> Result<u64, DatabaseError>
    where
        M::Update: 'a,
    {
        let values = payload.into().into_values(Fields::Set);
        let Some((sql, params)) = Self::update_sql(conditions, values) else {
            return Ok(0);
        };
        tracing::debug!(target: SQL_TARGET, table = M::TABLE, %sql);
        Ok(conn.execute(&sql, libsql::params_from_iter(params)).await?)
    }

    /// Write the full declared field set (declared defaults for unprovided
    /// fields) to matching rows and return the first updated row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn update<'a>(
        conn: &Connection,
        conditions: &[Condition],
        payload: impl Into<Payload<'a, M::Update>>,
    ) -> Result<Option<M>, DatabaseError>
    where
        M::Update: 'a,
    {
        Self::update_returning(conn, conditions, payload.into().into_values(Fields::All)).await
    }

    async fn update_returning(
        conn: &Connection,
        conditions: &[Condition],
        values: Values,
    ) -> Result<Option<M>, DatabaseError> {
        let Some((sql, params)) = Self::update_sql(conditions, values) else {
            return Self::find_one_or_none(conn, conditions).await;
        };
        let sql = format!("{sql} RETURNING {}", Self::select_list());
        Self::query_first(conn, &sql, params).await
    }

    /// Delete matching rows and return the first removed identifier.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn delete_returning_id(
        conn: &Connection,
        conditions: &[Condition],
    ) -> Result<Option<Uuid>, DatabaseError> {
        let mut params = Vec::new();
        let filter = where_clause(conditions, &mut params);
        let sql = format!("DELETE FROM {}{filter} RETURNING {}", M::TABLE, M::ID);
        tracing::debug!(target: SQL_TARGET, table = M::TABLE, %sql);

        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let mut first = None;
        while let Some(row) = rows.next().await? {
            if first.is_none() {
                first = Some(parse_uuid(&row.get::<String>(0)?)?);
            }
        }
        Ok(first)
    }

    /// Number of rows matching every condition.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count(conn: &Connection, conditions: &[Condition]) -> Result<u64, DatabaseError> {
        let mut params = Vec::new();
        let filter = where_clause(conditions, &mut params);
        let sql = format!("SELECT COUNT(*) FROM {}{filter}", M::TABLE);
        Self::count_from_stmt(conn, &sql, params).await
    }

    /// Run a pre-built counting query whose first column is the count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or yields no row.
    pub async fn count_from_stmt(
        conn: &Connection,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<u64, DatabaseError> {
        tracing::debug!(target: SQL_TARGET, table = M::TABLE, %sql);
        let mut rows = conn.query(sql, libsql::params_from_iter(params)).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|_| DatabaseError::Query(format!("negative count {count}")))
    }
}
