//! SQLite backend integration tests.
//!
//! These tests exercise file-backed databases, batch lookups and the backend
//! lifecycle.

mod common;

use larvixon_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};
use larvixon_persistence::core::{Backend, PatientStorage, PatientTransaction, TransactionProvider};
use larvixon_persistence::generator::PatientGenerator;
use larvixon_persistence::seed::seed_patients;

use common::{create_backend, insert_all, patient, roster};

// ============================================================================
// Lookup Tests
// ============================================================================

#[tokio::test]
async fn test_find_by_guids_skips_unknown() {
    let backend = create_backend();
    insert_all(&backend, roster()).await;

    let guids = vec![
        "guid-marek".to_string(),
        "missing-1".to_string(),
        "guid-jan".to_string(),
    ];
    let records = backend.find_by_guids(&guids, 100).await.unwrap();

    let found: Vec<&str> = records.iter().map(|r| r.internal_guid.as_str()).collect();
    assert_eq!(found, vec!["guid-jan", "guid-marek"]);
}

#[tokio::test]
async fn test_find_by_guids_respects_limit() {
    let backend = create_backend();
    insert_all(&backend, roster()).await;

    let guids: Vec<String> = roster().into_iter().map(|p| p.internal_guid).collect();
    let records = backend.find_by_guids(&guids, 2).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_find_by_guid() {
    let backend = create_backend();
    insert_all(&backend, roster()).await;

    let record = backend.find_by_guid("guid-janina").await.unwrap().unwrap();
    assert_eq!(record.first_name, "Janina");
    assert_eq!(record.canonical_id(), "patient-002");

    assert!(backend.find_by_guid("missing-1").await.unwrap().is_none());
}

// ============================================================================
// Transaction Tests
// ============================================================================

#[tokio::test]
async fn test_transaction_lifecycle() {
    let backend = create_backend();
    let mut tx = Box::new(backend.begin_transaction().await.unwrap());
    tx.insert(patient("g-1", "Jan", "Nowak")).await.unwrap();
    assert!(tx.is_active());
    tx.commit().await.unwrap();

    // A committed transaction is consumed; a fresh one can still be opened.
    let tx = Box::new(backend.begin_transaction().await.unwrap());
    tx.rollback().await.unwrap();
    assert_eq!(backend.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_ids_continue_after_clear() {
    let backend = create_backend();
    insert_all(&backend, vec![patient("g-1", "Jan", "Nowak")]).await;
    backend.clear().await.unwrap();

    let records = insert_all(&backend, vec![patient("g-2", "Anna", "Nowak")]).await;
    // AUTOINCREMENT never reuses ids
    assert_eq!(records[0].id, 2);
}

// ============================================================================
// File Backend Tests
// ============================================================================

#[tokio::test]
async fn test_file_database_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.db");

    {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.initialize().await.unwrap();
        seed_patients(&backend, &mut PatientGenerator::from_seed(9), 12)
            .await
            .unwrap();
    }

    let backend = SqliteBackend::open(&path).unwrap();
    backend.initialize().await.unwrap();
    assert_eq!(backend.count().await.unwrap(), 12);
    assert!(backend.health_check().await.is_ok());
}

#[tokio::test]
async fn test_file_database_with_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = SqliteBackendConfig {
        max_connections: 2,
        enable_wal: false,
        ..Default::default()
    };
    let backend = SqliteBackend::with_config(dir.path().join("patients.db"), config).unwrap();
    backend.init_schema().unwrap();

    assert_eq!(backend.config().max_connections, 2);
    insert_all(&backend, roster()).await;
    assert_eq!(backend.list(3).await.unwrap().len(), 3);
}
