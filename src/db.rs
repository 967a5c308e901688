//! Database initialization.

use rusqlite::Connection;

use crate::{Error, record::create_record_table};

/// Create the application's tables if they do not exist yet.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_record_table(connection)?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_record_table() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'record'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
    }
}
