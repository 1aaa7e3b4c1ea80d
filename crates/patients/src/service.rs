//! Patient search and retrieval.
//!
//! [`PatientService`] sits between a caller and the record store. It runs
//! the query, maps every matched record to a FHIR `Patient` and packages the
//! results as a `searchset` bundle.

use std::collections::HashSet;
use std::sync::Arc;

use larvixon_fhir::{Bundle, Patient};
use larvixon_persistence::error::{ResourceError, StorageError, StorageResult};
use larvixon_persistence::{PatientRecord, PatientSearch, PatientStorage, SEARCH_RESULT_LIMIT};
use tracing::{debug, warn};

use crate::bundle::search_bundle;
use crate::mapper::to_fhir_patient;

/// Outcome of resolving several external ids at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchLookup {
    /// Records that were found, in store order.
    pub records: Vec<PatientRecord>,
    /// Requested ids with no matching record, in request order.
    pub missing: Vec<String>,
}

/// Search, batch and single-record retrieval over a patient store.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use larvixon_patients::PatientService;
/// use larvixon_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::open("data/patients.db")?;
/// let service = PatientService::new(Arc::new(backend));
/// let bundle = service.search(&PatientSearch::term("kowal")).await?;
/// ```
pub struct PatientService<S> {
    storage: Arc<S>,
}

impl<S> Clone for PatientService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: PatientStorage> PatientService<S> {
    /// Creates a service over the given store.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Searches patients and returns the matches as a `searchset` bundle.
    ///
    /// Criteria are OR-combined, empty criteria return every patient, and at
    /// most [`SEARCH_RESULT_LIMIT`] entries are returned.
    pub async fn search(&self, criteria: &PatientSearch) -> StorageResult<Bundle> {
        debug!(
            first_name = criteria.first_name(),
            last_name = criteria.last_name(),
            national_id = criteria.national_id(),
            "Processing search request"
        );

        let records = self.storage.search(criteria, SEARCH_RESULT_LIMIT).await?;
        Ok(Self::bundle(&records))
    }

    /// Resolves external ids, reporting the ones that are not stored.
    ///
    /// Duplicate ids are collapsed and an empty request never reaches the
    /// store. At most [`SEARCH_RESULT_LIMIT`] records are returned; stored
    /// ids beyond that cap are neither returned nor reported missing.
    /// Misses are logged but are not an error.
    pub async fn lookup_by_external_ids(&self, ids: &[String]) -> StorageResult<BatchLookup> {
        let mut seen = HashSet::new();
        let unique: Vec<String> = ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        if unique.is_empty() {
            return Ok(BatchLookup::default());
        }

        debug!(requested = unique.len(), "Processing batch lookup");
        let records = self
            .storage
            .find_by_guids(&unique, SEARCH_RESULT_LIMIT)
            .await?;

        // Ids past the cap are absent from `records`; check them against the
        // store instead.
        let found: HashSet<String> =
            if records.len() >= SEARCH_RESULT_LIMIT && records.len() < unique.len() {
                self.storage.existing_guids(&unique).await?
            } else {
                records.iter().map(|r| r.internal_guid.clone()).collect()
            };
        let missing: Vec<String> = unique
            .into_iter()
            .filter(|id| !found.contains(id))
            .collect();

        if !missing.is_empty() {
            warn!(missing = ?missing, "Patients not found for batch lookup");
        }

        Ok(BatchLookup { records, missing })
    }

    /// Resolves external ids into a `searchset` bundle, dropping misses.
    pub async fn get_by_external_ids(&self, ids: &[String]) -> StorageResult<Bundle> {
        let lookup = self.lookup_by_external_ids(ids).await?;
        Ok(Self::bundle(&lookup.records))
    }

    /// Reads a single patient by external id.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no patient has this id
    pub async fn get_by_external_id(&self, id: &str) -> StorageResult<Patient> {
        debug!(id = %id, "Processing read request");
        match self.storage.find_by_guid(id).await? {
            Some(record) => Ok(to_fhir_patient(&record)),
            None => Err(StorageError::Resource(ResourceError::NotFound {
                id: id.to_string(),
            })),
        }
    }

    fn bundle(records: &[PatientRecord]) -> Bundle {
        search_bundle(records.iter().map(to_fhir_patient).collect())
    }
}
