//! Core patient storage trait.
//!
//! This module defines the [`PatientStorage`] trait, the read side of the
//! record store together with the bulk administrative operations.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{PatientRecord, PatientSearch};

/// Read access to stored patients.
///
/// Records are only ever created through a transaction (see
/// [`TransactionProvider`](super::TransactionProvider)) and removed in bulk
/// by [`clear`](PatientStorage::clear); they are never updated in place.
///
/// Every query returns records in ascending numeric id order.
///
/// # Example
///
/// ```ignore
/// use larvixon_persistence::core::PatientStorage;
/// use larvixon_persistence::types::{PatientSearch, SEARCH_RESULT_LIMIT};
///
/// async fn example<S: PatientStorage>(storage: &S) -> Result<(), StorageError> {
///     let criteria = PatientSearch::default().with_last_name("nowak");
///     let records = storage.search(&criteria, SEARCH_RESULT_LIMIT).await?;
///     for record in &records {
///         println!("{} {}", record.canonical_id(), record.last_name);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait PatientStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Searches for patients matching any of the supplied criteria.
    ///
    /// # Arguments
    ///
    /// * `criteria` - OR-combined criteria; empty criteria match every record
    /// * `limit` - Maximum number of records to return
    async fn search(
        &self,
        criteria: &PatientSearch,
        limit: usize,
    ) -> StorageResult<Vec<PatientRecord>>;

    /// Reads the patients whose external guid is one of `guids`.
    ///
    /// Unknown guids are skipped; no error is raised for them.
    async fn find_by_guids(
        &self,
        guids: &[String],
        limit: usize,
    ) -> StorageResult<Vec<PatientRecord>>;

    /// Returns which of `guids` are stored, with no cap on the count.
    ///
    /// The default implementation reads the full records; backends override
    /// it with a cheaper existence query.
    async fn existing_guids(&self, guids: &[String]) -> StorageResult<HashSet<String>> {
        let records = self.find_by_guids(guids, guids.len()).await?;
        Ok(records.into_iter().map(|r| r.internal_guid).collect())
    }

    /// Reads a single patient by external guid.
    async fn find_by_guid(&self, guid: &str) -> StorageResult<Option<PatientRecord>> {
        let mut records = self.find_by_guids(&[guid.to_string()], 1).await?;
        Ok(records.pop())
    }

    /// Returns the first `limit` patients in store order.
    async fn list(&self, limit: usize) -> StorageResult<Vec<PatientRecord>>;

    /// Counts the stored patients.
    async fn count(&self) -> StorageResult<u64>;

    /// Deletes every patient and returns how many were removed.
    async fn clear(&self) -> StorageResult<u64>;
}
