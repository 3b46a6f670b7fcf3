//! Row decoding and SQL text helpers.
//!
//! `libsql::Row` is column-indexed; these helpers isolate the conversions the
//! accessors need and handle the timestamp formats the store may hand back.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DatabaseError;

/// SQL expression for the store's current UTC time, millisecond precision.
///
/// The store clock has no finer resolution, so two writes within the same
/// millisecond get the same timestamp: `updated_at` never decreases but is not
/// strictly increasing.
pub const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Escape character used by every `LIKE` pattern this crate builds.
pub const LIKE_ESCAPE: char = '\\';

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles RFC 3339 (`"2026-02-09T14:30:00.123Z"`) and `SQLite`'s
/// `datetime('now')` format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column holding a UUID.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the text is not a UUID.
pub fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::Query(format!("Invalid UUID '{s}': {e}")))
}

/// Read a nullable TEXT column.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?)
}

/// Read an INTEGER column stored as a 0/1 flag.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a nullable, non-negative INTEGER column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored value does not fit in `u32`.
pub fn get_opt_u32(row: &libsql::Row, idx: i32) -> Result<Option<u32>, DatabaseError> {
    row.get::<Option<i64>>(idx)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| DatabaseError::Query(format!("Column {idx} out of range: {v}")))
        })
        .transpose()
}

/// Escape `LIKE` wildcards so `needle` matches literally.
#[must_use]
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    #[test]
    fn parses_millisecond_rfc3339() {
        let dt = parse_datetime("2026-02-09T14:30:00.123Z").unwrap();
        assert_eq!(dt.year(), 2026);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn parses_sqlite_datetime() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn rejects_garbage_datetime() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(_))
        ));
    }

    #[test]
    fn rejects_garbage_uuid() {
        assert!(parse_uuid("tsk-1234").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string()).unwrap(), id);
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("100%", "100\\%")]
    #[case("a_b", "a\\_b")]
    #[case("back\\slash", "back\\\\slash")]
    #[case("задача", "задача")]
    fn escapes_like_wildcards(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }
}
