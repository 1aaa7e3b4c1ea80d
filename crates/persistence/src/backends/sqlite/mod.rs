//! SQLite backend implementation.
//!
//! This module provides a SQLite implementation of all storage traits. It
//! supports both in-memory databases (great for testing) and file-based
//! databases.
//!
//! # Example
//!
//! ```no_run
//! use larvixon_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("data/patients.db")?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE patients (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     internal_guid TEXT NOT NULL UNIQUE,
//!     pesel TEXT UNIQUE,            -- 11 digits when present
//!     first_name TEXT NOT NULL,
//!     last_name TEXT NOT NULL,
//!     first_name_folded TEXT NOT NULL,  -- lowercased, for search
//!     last_name_folded TEXT NOT NULL,
//!     birth_date TEXT,              -- YYYY-MM-DD
//!     gender TEXT,                  -- male | female
//!     phone TEXT,
//!     email TEXT,
//!     address_line TEXT,
//!     city TEXT,
//!     postal_code TEXT,
//!     country TEXT DEFAULT 'PL'
//! );
//! ```

mod backend;
mod query;
mod schema;
mod storage;
mod transaction;

pub use backend::{MEMORY_PATH, SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
pub use transaction::SqliteTransaction;
