//! Defines the core data model and database queries for records.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Alias for the integer type used for mapping to database IDs.
pub type RecordId = i64;

// ============================================================================
// MODEL
// ============================================================================

/// One financial entry: a monetary value and the date it was spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The ID of the record.
    pub id: RecordId,
    /// The amount of money spent.
    pub value: f64,
    /// When the money was spent.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new record in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_record(value: f64, date: Date, connection: &Connection) -> Result<Record, Error> {
    let record = connection
        .prepare(
            "INSERT INTO record (value, date)
             VALUES (?1, ?2)
             RETURNING id, value, date",
        )?
        .query_row((value, date), map_record_row)?;

    Ok(record)
}

/// Retrieve a record from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid record,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_record(id: RecordId, connection: &Connection) -> Result<Record, Error> {
    let record = connection
        .prepare("SELECT id, value, date FROM record WHERE id = :id")?
        .query_one(&[(":id", &id)], map_record_row)?;

    Ok(record)
}

type RowsAffected = usize;

/// Delete a record from the database by its `id`.
///
/// Returns the number of rows affected: zero means the record did not exist,
/// which callers treat as already deleted rather than as an error.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_record(id: RecordId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM record WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Retrieve every record in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_records(connection: &Connection) -> Result<Vec<Record>, Error> {
    connection
        .prepare("SELECT id, value, date FROM record ORDER BY id ASC")?
        .query_map([], map_record_row)?
        .map(|row| row.map_err(|error| error.into()))
        .collect()
}

/// Get the total number of records in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
#[cfg(test)]
pub fn count_records(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM record;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the record table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS record (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                value REAL NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('record', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Record.
pub fn map_record_row(row: &Row) -> Result<Record, rusqlite::Error> {
    let id = row.get(0)?;
    let value = row.get(1)?;
    let date = row.get(2)?;

    Ok(Record { id, value, date })
}

// ============================================================================
// TESTS
// ============================================================================
