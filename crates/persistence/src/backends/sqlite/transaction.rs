//! Transaction support for SQLite backend.

use async_trait::async_trait;
use parking_lot::Mutex;
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::core::{PatientTransaction, TransactionProvider};
use crate::error::{StorageError, StorageResult, TransactionError};
use crate::types::{NewPatient, PatientRecord};

use super::SqliteBackend;
use super::query::fold;

/// A SQLite transaction.
///
/// Holds its pooled connection until it is committed, rolled back or
/// dropped. Dropping an active transaction rolls it back.
pub struct SqliteTransaction {
    /// The connection used for this transaction.
    conn: Mutex<PooledConnection<SqliteConnectionManager>>,
    /// Whether the transaction is still active.
    active: bool,
    /// Number of rows inserted so far.
    inserted: usize,
}

impl std::fmt::Debug for SqliteTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTransaction")
            .field("active", &self.active)
            .field("inserted", &self.inserted)
            .finish()
    }
}

impl SqliteTransaction {
    /// Create a new transaction.
    fn new(conn: PooledConnection<SqliteConnectionManager>) -> StorageResult<Self> {
        conn.execute("BEGIN IMMEDIATE", []).map_err(|e| {
            StorageError::Transaction(TransactionError::RolledBack {
                reason: format!("Failed to begin transaction: {}", e),
            })
        })?;

        Ok(Self {
            conn: Mutex::new(conn),
            active: true,
            inserted: 0,
        })
    }
}

#[async_trait]
impl PatientTransaction for SqliteTransaction {
    async fn insert(&mut self, patient: NewPatient) -> StorageResult<PatientRecord> {
        if !self.active {
            return Err(StorageError::Transaction(
                TransactionError::InvalidTransaction,
            ));
        }

        let country = patient.country_or_default().to_string();
        let birth_date = patient.birth_date.map(|d| d.format("%Y-%m-%d").to_string());
        let gender = patient.gender.map(|g| g.as_str());

        let id = {
            let conn = self.conn.lock();
            conn.execute(
                "INSERT INTO patients (internal_guid, pesel, first_name, last_name,
                    first_name_folded, last_name_folded, birth_date, gender, phone, email,
                    address_line, city, postal_code, country)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    patient.internal_guid,
                    patient.pesel,
                    patient.first_name,
                    patient.last_name,
                    fold(&patient.first_name),
                    fold(&patient.last_name),
                    birth_date,
                    gender,
                    patient.phone,
                    patient.email,
                    patient.address_line,
                    patient.city,
                    patient.postal_code,
                    country,
                ],
            )?;
            conn.last_insert_rowid()
        };
        self.inserted += 1;

        Ok(PatientRecord {
            id,
            internal_guid: patient.internal_guid,
            pesel: patient.pesel,
            first_name: patient.first_name,
            last_name: patient.last_name,
            birth_date: patient.birth_date,
            gender: patient.gender,
            phone: patient.phone,
            email: patient.email,
            address_line: patient.address_line,
            city: patient.city,
            postal_code: patient.postal_code,
            country: Some(country),
        })
    }

    async fn commit(mut self: Box<Self>) -> StorageResult<()> {
        if !self.active {
            return Err(StorageError::Transaction(
                TransactionError::InvalidTransaction,
            ));
        }

        self.conn.lock().execute("COMMIT", []).map_err(|e| {
            StorageError::Transaction(TransactionError::RolledBack {
                reason: format!("Commit failed: {}", e),
            })
        })?;

        self.active = false;
        tracing::debug!(inserted = self.inserted, "Transaction committed");
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> StorageResult<()> {
        if !self.active {
            return Err(StorageError::Transaction(
                TransactionError::InvalidTransaction,
            ));
        }

        self.conn.lock().execute("ROLLBACK", []).map_err(|e| {
            StorageError::Transaction(TransactionError::RolledBack {
                reason: format!("Rollback failed: {}", e),
            })
        })?;

        self.active = false;
        tracing::debug!(discarded = self.inserted, "Transaction rolled back");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for SqliteTransaction {
    fn drop(&mut self) {
        // If transaction wasn't explicitly committed or rolled back, roll it back
        if self.active {
            let _ = self.conn.lock().execute("ROLLBACK", []);
        }
    }
}

#[async_trait]
impl TransactionProvider for SqliteBackend {
    type Transaction = SqliteTransaction;

    async fn begin_transaction(&self) -> StorageResult<Self::Transaction> {
        let conn = self.get_connection()?;
        SqliteTransaction::new(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PatientStorage;
    use crate::error::BackendError;

    fn create_backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to initialize schema");
        backend
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let backend = create_backend();
        let mut tx = Box::new(backend.begin_transaction().await.unwrap());

        let first = tx.insert(NewPatient::new("g-1", "Jan", "Nowak")).await.unwrap();
        let second = tx.insert(NewPatient::new("g-2", "Anna", "Nowak")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.canonical_id(), "patient-002");
        assert_eq!(first.country.as_deref(), Some("PL"));

        tx.commit().await.unwrap();
        assert_eq!(backend.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_rollback_discards_inserts() {
        let backend = create_backend();
        let mut tx = Box::new(backend.begin_transaction().await.unwrap());
        tx.insert(NewPatient::new("g-1", "Jan", "Nowak")).await.unwrap();
        assert!(tx.is_active());
        tx.rollback().await.unwrap();

        assert_eq!(backend.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let backend = create_backend();
        {
            let mut tx = backend.begin_transaction().await.unwrap();
            tx.insert(NewPatient::new("g-1", "Jan", "Nowak")).await.unwrap();
        }
        // The in-memory pool has a single connection; it must be usable again.
        assert_eq!(backend.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_pesel_is_constraint_violation() {
        let backend = create_backend();
        let mut tx = Box::new(backend.begin_transaction().await.unwrap());
        tx.insert(NewPatient::new("g-1", "Jan", "Nowak").with_pesel("44051401359"))
            .await
            .unwrap();
        let err = tx
            .insert(NewPatient::new("g-2", "Jan", "Nowak").with_pesel("44051401359"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Backend(BackendError::ConstraintViolation { .. })
        ));
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_pesels_do_not_collide() {
        let backend = create_backend();
        let mut tx = Box::new(backend.begin_transaction().await.unwrap());
        for i in 0..3 {
            tx.insert(NewPatient::new(format!("g-{}", i), "Jan", "Nowak"))
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();
        assert_eq!(backend.count().await.unwrap(), 3);
    }
}
