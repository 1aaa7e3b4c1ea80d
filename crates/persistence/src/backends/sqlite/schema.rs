//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

fn migration_error(context: &str, e: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::MigrationError {
        message: format!("{}: {}", context, e),
    })
}

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
        tracing::debug!(version = SCHEMA_VERSION, "Created patients schema");
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

/// Get the current schema version.
pub(crate) fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create schema_version table", e))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error("Failed to clear schema_version", e))?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| migration_error("Failed to set schema_version", e))?;

    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS patients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            internal_guid TEXT NOT NULL UNIQUE,
            pesel TEXT UNIQUE CHECK (pesel IS NULL OR length(pesel) = 11),
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            first_name_folded TEXT NOT NULL,
            last_name_folded TEXT NOT NULL,
            birth_date TEXT,
            gender TEXT CHECK (gender IS NULL OR gender IN ('male', 'female')),
            phone TEXT,
            email TEXT,
            address_line TEXT,
            city TEXT,
            postal_code TEXT,
            country TEXT DEFAULT 'PL'
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create patients table", e))?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_patients_first_name ON patients(first_name_folded);
         CREATE INDEX IF NOT EXISTS idx_patients_last_name ON patients(last_name_folded);",
    )
    .map_err(|e| migration_error("Failed to create name indexes", e))?;

    Ok(())
}
