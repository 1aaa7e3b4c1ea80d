//! Test infrastructure for the persistence layer.

#![allow(dead_code)]

use larvixon_persistence::backends::sqlite::SqliteBackend;
use larvixon_persistence::core::{PatientTransaction, TransactionProvider};
use larvixon_persistence::types::{Gender, NewPatient, PatientRecord};

/// Creates an in-memory backend with the schema in place.
pub fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

/// A named patient with a predictable guid.
pub fn patient(guid: &str, first_name: &str, last_name: &str) -> NewPatient {
    NewPatient::new(guid, first_name, last_name)
}

/// Inserts `patients` in one committed transaction.
pub async fn insert_all(backend: &SqliteBackend, patients: Vec<NewPatient>) -> Vec<PatientRecord> {
    let mut tx = Box::new(
        backend
            .begin_transaction()
            .await
            .expect("Failed to begin transaction"),
    );
    let mut records = Vec::with_capacity(patients.len());
    for patient in patients {
        records.push(tx.insert(patient).await.expect("Failed to insert patient"));
    }
    tx.commit().await.expect("Failed to commit");
    records
}

/// The fixed roster used by the search tests.
pub fn roster() -> Vec<NewPatient> {
    vec![
        patient("guid-jan", "Jan", "Kowalski")
            .with_pesel("44051401359")
            .with_gender(Gender::Male),
        patient("guid-janina", "Janina", "Nowak")
            .with_pesel("02270803624")
            .with_gender(Gender::Female),
        patient("guid-marek", "Marek", "Zieliński").with_gender(Gender::Male),
        patient("guid-lucja", "Łucja", "Wiśniewska").with_gender(Gender::Female),
        patient("guid-zofia", "Zofia", "Janowska").with_gender(Gender::Female),
    ]
}
