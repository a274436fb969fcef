//! Database operations and SQLite management for instructors, steps and tasks.
//!
//! This module provides the low-level persistence of the onboarding engine.
//! It owns the SQLite connection and schema, and splits queries by entity.
//! Every mutation that touches a task also recomputes the owning step inside
//! the same transaction, so stored step counters never drift from the tasks.
//!
//! Each service call opens its own connection. Transactions that read before
//! they write begin `IMMEDIATE`, so concurrent writers queue on the busy
//! timeout instead of failing with `SQLITE_BUSY` on lock upgrade.

use std::{path::Path, time::Duration};

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod instructor_queries;
pub mod migrations;
pub mod step_queries;
pub mod task_queries;

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses a column into any `FromStr` type, reporting failures as conversion
/// errors on that column.
pub(crate) fn parse_column<T>(row: &rusqlite::Row, index: usize, what: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("Invalid {what}: {raw}").into(),
        )
    })
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Reads a `YYYY-MM-DD` date column.
pub(crate) fn date_column(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(index)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Begins a transaction that takes the write lock up front.
pub(crate) fn begin_write(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .db_context("Failed to begin transaction")
}
