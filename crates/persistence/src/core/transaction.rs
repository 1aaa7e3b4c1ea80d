//! Transaction traits for atomic inserts.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{NewPatient, PatientRecord};

use super::storage::PatientStorage;

/// A database transaction.
///
/// Inserts become visible to other connections only when `commit()` is
/// called. A transaction that is dropped while still active is rolled back.
///
/// # Example
///
/// ```ignore
/// use larvixon_persistence::core::{PatientTransaction, TransactionProvider};
///
/// async fn insert_one<S: TransactionProvider>(
///     storage: &S,
///     patient: NewPatient,
/// ) -> Result<PatientRecord, StorageError> {
///     let mut tx = Box::new(storage.begin_transaction().await?);
///     let record = tx.insert(patient).await?;
///     tx.commit().await?;
///     Ok(record)
/// }
/// ```
#[async_trait]
pub trait PatientTransaction: Send + Sync {
    /// Inserts a patient and returns the stored record with its assigned id.
    async fn insert(&mut self, patient: NewPatient) -> StorageResult<PatientRecord>;

    /// Commits the transaction, persisting all changes.
    ///
    /// After calling this, the transaction is consumed and cannot be used again.
    async fn commit(self: Box<Self>) -> StorageResult<()>;

    /// Rolls back the transaction, discarding all changes.
    ///
    /// After calling this, the transaction is consumed and cannot be used again.
    async fn rollback(self: Box<Self>) -> StorageResult<()>;

    /// Returns whether this transaction is still active.
    fn is_active(&self) -> bool;
}

/// Provider for transaction support.
#[async_trait]
pub trait TransactionProvider: PatientStorage {
    /// The transaction type returned by this provider.
    type Transaction: PatientTransaction;

    /// Begins a new transaction.
    ///
    /// # Errors
    ///
    /// * `StorageError::Transaction(RolledBack)` - If the transaction cannot be started
    /// * `StorageError::Backend` - If a connection cannot be acquired
    async fn begin_transaction(&self) -> StorageResult<Self::Transaction>;
}
