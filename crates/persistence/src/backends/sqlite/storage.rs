//! PatientStorage implementation for SQLite.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params_from_iter};

use crate::core::PatientStorage;
use crate::error::StorageResult;
use crate::types::{Gender, PatientRecord, PatientSearch};

use super::SqliteBackend;
use super::query::{self, SqlFragment};

/// Maps a row selected with [`query::PATIENT_COLUMNS`].
pub(crate) fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    let birth_date: Option<String> = row.get(5)?;
    let birth_date = birth_date
        .map(|value| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))
        })
        .transpose()?;

    let gender: Option<String> = row.get(6)?;
    let gender = gender
        .map(|value| {
            value.parse::<Gender>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, e.into())
            })
        })
        .transpose()?;

    Ok(PatientRecord {
        id: row.get(0)?,
        internal_guid: row.get(1)?,
        pesel: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        birth_date,
        gender,
        phone: row.get(7)?,
        email: row.get(8)?,
        address_line: row.get(9)?,
        city: row.get(10)?,
        postal_code: row.get(11)?,
        country: row.get(12)?,
    })
}

fn query_records(conn: &Connection, query: &SqlFragment) -> StorageResult<Vec<PatientRecord>> {
    let mut stmt = conn.prepare(&query.sql)?;
    let rows = stmt.query_map(params_from_iter(query.params.iter()), row_to_record)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

#[async_trait]
impl PatientStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn search(
        &self,
        criteria: &PatientSearch,
        limit: usize,
    ) -> StorageResult<Vec<PatientRecord>> {
        let conn = self.get_connection()?;
        let query = query::select_patients(query::search_filter(criteria), limit);
        tracing::debug!(sql = %query.sql, params = query.params.len(), "Searching patients");

        let records = query_records(&conn, &query)?;
        tracing::debug!(matched = records.len(), "Patient search complete");
        Ok(records)
    }

    async fn find_by_guids(
        &self,
        guids: &[String],
        limit: usize,
    ) -> StorageResult<Vec<PatientRecord>> {
        if guids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_connection()?;
        tracing::debug!(requested = guids.len(), "Reading patients by guid");

        // Each chunk keeps its own first `limit` rows, so the merged first
        // `limit` by id is exact.
        let mut records = Vec::new();
        for chunk in guids.chunks(query::MAX_GUIDS_PER_QUERY) {
            let query = query::select_patients(query::guid_filter(chunk), limit);
            records.extend(query_records(&conn, &query)?);
        }
        records.sort_by_key(|r| r.id);
        records.truncate(limit);
        Ok(records)
    }

    async fn existing_guids(&self, guids: &[String]) -> StorageResult<HashSet<String>> {
        let mut found = HashSet::new();
        if guids.is_empty() {
            return Ok(found);
        }
        let conn = self.get_connection()?;
        for chunk in guids.chunks(query::MAX_GUIDS_PER_QUERY) {
            let query = query::select_guids(query::guid_filter(chunk));
            let mut stmt = conn.prepare(&query.sql)?;
            let rows = stmt.query_map(params_from_iter(query.params.iter()), |row| {
                row.get::<_, String>(0)
            })?;
            for guid in rows {
                found.insert(guid?);
            }
        }
        tracing::debug!(requested = guids.len(), found = found.len(), "Checked guid existence");
        Ok(found)
    }

    async fn list(&self, limit: usize) -> StorageResult<Vec<PatientRecord>> {
        let conn = self.get_connection()?;
        let query = query::select_patients(SqlFragment::default(), limit);
        query_records(&conn, &query)
    }

    async fn count(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    async fn clear(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let deleted = conn.execute("DELETE FROM patients", [])?;
        tracing::info!(deleted, "Cleared patient store");
        Ok(deleted as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PatientTransaction, TransactionProvider};
    use crate::types::NewPatient;

    fn create_backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to initialize schema");
        backend
    }

    async fn insert(backend: &SqliteBackend, patients: Vec<NewPatient>) {
        let mut tx = Box::new(backend.begin_transaction().await.unwrap());
        for patient in patients {
            tx.insert(patient).await.unwrap();
        }
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_row_mapping_round_trip() {
        let backend = create_backend();
        let patient = NewPatient::new("guid-1", "Łucja", "Wiśniewska")
            .with_pesel("02270803624")
            .with_birth_date(NaiveDate::from_ymd_opt(2002, 7, 8).unwrap())
            .with_gender(Gender::Female)
            .with_contact("+48 512 345 678", "lucja@example.pl")
            .with_address(Some("ul. Polna 3"), "Kraków", "30-001", "PL");
        insert(&backend, vec![patient.clone()]).await;

        let record = backend.find_by_guid("guid-1").await.unwrap().unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.pesel, patient.pesel);
        assert_eq!(record.first_name, "Łucja");
        assert_eq!(record.birth_date, patient.birth_date);
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.address_line.as_deref(), Some("ul. Polna 3"));
        assert_eq!(record.country.as_deref(), Some("PL"));
    }

    #[tokio::test]
    async fn test_find_by_guid_missing() {
        let backend = create_backend();
        assert!(backend.find_by_guid("missing-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_guids_empty_request() {
        let backend = create_backend();
        assert!(backend.find_by_guids(&[], 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_list_clear() {
        let backend = create_backend();
        insert(
            &backend,
            (0..5)
                .map(|i| NewPatient::new(format!("guid-{}", i), "Jan", "Nowak"))
                .collect(),
        )
        .await;

        assert_eq!(backend.count().await.unwrap(), 5);

        let listed = backend.list(3).await.unwrap();
        assert_eq!(
            listed.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        assert_eq!(backend.clear().await.unwrap(), 5);
        assert_eq!(backend.count().await.unwrap(), 0);
        assert_eq!(backend.clear().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_by_guids_spans_chunks_in_id_order() {
        let backend = create_backend();
        let total = query::MAX_GUIDS_PER_QUERY + 100;
        insert(
            &backend,
            (0..total)
                .map(|i| NewPatient::new(format!("guid-{}", i), "Jan", "Nowak"))
                .collect(),
        )
        .await;

        // Newest first, so the lowest ids land in the last chunk.
        let guids: Vec<String> = (0..total).rev().map(|i| format!("guid-{}", i)).collect();

        let records = backend.find_by_guids(&guids, 100).await.unwrap();
        assert_eq!(
            records.iter().map(|r| r.id).collect::<Vec<_>>(),
            (1..=100).collect::<Vec<i64>>()
        );

        let all = backend.find_by_guids(&guids, total).await.unwrap();
        assert_eq!(all.len(), total);
    }

    #[tokio::test]
    async fn test_find_by_guids_beyond_variable_limit() {
        let backend = create_backend();
        insert(&backend, vec![NewPatient::new("guid-kept", "Jan", "Nowak")]).await;

        let mut guids: Vec<String> = (0..40_000).map(|i| format!("missing-{}", i)).collect();
        guids.push("guid-kept".to_string());

        let records = backend.find_by_guids(&guids, 100).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].internal_guid, "guid-kept");

        let existing = backend.existing_guids(&guids).await.unwrap();
        assert_eq!(existing, HashSet::from(["guid-kept".to_string()]));
    }

    #[tokio::test]
    async fn test_existing_guids_is_uncapped() {
        let backend = create_backend();
        insert(
            &backend,
            (0..150)
                .map(|i| NewPatient::new(format!("guid-{}", i), "Anna", "Nowak"))
                .collect(),
        )
        .await;

        let guids: Vec<String> = (0..160).map(|i| format!("guid-{}", i)).collect();
        let existing = backend.existing_guids(&guids).await.unwrap();
        assert_eq!(existing.len(), 150);
        assert!(existing.contains("guid-149"));
        assert!(!existing.contains("guid-150"));
        assert!(backend.existing_guids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_row_is_serialization_error() {
        let backend = create_backend();
        backend
            .get_connection()
            .unwrap()
            .execute(
                "INSERT INTO patients (internal_guid, first_name, last_name,
                    first_name_folded, last_name_folded, birth_date)
                 VALUES ('guid-bad', 'Jan', 'Nowak', 'jan', 'nowak', 'not-a-date')",
                [],
            )
            .unwrap();

        let err = backend.list(10).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::StorageError::Backend(
                crate::error::BackendError::SerializationError { .. }
            )
        ));
    }
}
