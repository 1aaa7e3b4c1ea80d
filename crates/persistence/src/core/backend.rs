//! Backend abstraction for database drivers.
//!
//! This module defines the [`Backend`] trait implemented by every store the
//! patient service can run on.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// A database backend that can hold patient records.
///
/// # Example
///
/// ```ignore
/// use larvixon_persistence::core::Backend;
///
/// backend.initialize().await?;
/// backend.health_check().await?;
/// println!("running on {}", backend.kind());
/// ```
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Initializes the database schema if needed. Must be idempotent.
    async fn initialize(&self) -> Result<(), BackendError>;
}
