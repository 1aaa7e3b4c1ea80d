//! Core storage traits and abstractions.
//!
//! - [`Backend`] - Database driver abstraction
//! - [`PatientStorage`] - Search, lookup and bulk administration
//! - [`PatientTransaction`] / [`TransactionProvider`] - Atomic inserts
//!
//! # Trait Hierarchy
//!
//! ```text
//! PatientStorage
//!     └── TransactionProvider ──> PatientTransaction
//! ```

mod backend;
mod storage;
mod transaction;

pub use backend::{Backend, BackendKind};
pub use storage::PatientStorage;
pub use transaction::{PatientTransaction, TransactionProvider};
