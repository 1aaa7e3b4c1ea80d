//! Larvixon Patients Persistence Layer
//!
//! This crate stores patient demographic records and generates synthetic
//! Polish patients to fill the store.
//!
//! # Features
//!
//! - **Search**: Case-insensitive substring search on names, raw substring
//!   search on PESEL, OR-combined and capped at [`SEARCH_RESULT_LIMIT`]
//! - **Transactions**: All-or-nothing batch inserts with rollback on drop
//! - **Synthetic data**: A seedable generator with valid PESEL numbers
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Patient record, insertion payload and search criteria
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits and abstractions
//! - [`generator`] - Synthetic patient generation and PESEL helpers
//! - [`seed`] - Seeding the store from a patient source
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), larvixon_persistence::StorageError> {
//! use larvixon_persistence::backends::sqlite::SqliteBackend;
//! use larvixon_persistence::generator::PatientGenerator;
//! use larvixon_persistence::seed::seed_patients;
//! use larvixon_persistence::{PatientSearch, PatientStorage, SEARCH_RESULT_LIMIT};
//!
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let mut generator = PatientGenerator::from_seed(42);
//! seed_patients(&backend, &mut generator, 50).await?;
//!
//! let criteria = PatientSearch::default().with_first_name("jan");
//! let matches = backend.search(&criteria, SEARCH_RESULT_LIMIT).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod generator;
pub mod seed;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{NewPatient, PatientRecord, PatientSearch, SEARCH_RESULT_LIMIT};

// Re-export core traits
pub use core::{Backend, BackendKind, PatientStorage, PatientTransaction, TransactionProvider};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
