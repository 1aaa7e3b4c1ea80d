//! Seeding the store with synthetic patients.
//!
//! A seed run is all-or-nothing: every record is inserted inside one
//! transaction, and any failure leaves the store exactly as it was.

use std::collections::HashSet;

use crate::core::{PatientTransaction, TransactionProvider};
use crate::error::{SeedError, StorageResult};
use crate::generator::PatientSource;
use crate::types::NewPatient;

/// Number of regenerations allowed for a candidate whose PESEL collides
/// with one already accepted in the same run.
pub const MAX_NATIONAL_ID_RETRIES: u32 = 100;

/// Number of patients seeded into an empty store at startup.
pub const DEFAULT_SEED_COUNT: usize = 50;

/// Inserts `count` patients drawn from `source` and returns how many were
/// created.
///
/// # Errors
///
/// * `StorageError::Seed(UniquenessExhausted)` - If a unique PESEL could not
///   be drawn within [`MAX_NATIONAL_ID_RETRIES`] regenerations
/// * `StorageError::Backend` - If the store rejects an insert or the commit
pub async fn seed_patients<S, P>(storage: &S, source: &mut P, count: usize) -> StorageResult<usize>
where
    S: TransactionProvider,
    P: PatientSource + Send,
{
    let mut tx = Box::new(storage.begin_transaction().await?);

    match insert_batch(tx.as_mut(), source, count).await {
        Ok(created) => {
            tx.commit().await?;
            tracing::info!(created, backend = storage.backend_name(), "Seeded patients");
            Ok(created)
        }
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed, rolling back");
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(error = %rollback_error, "Rollback after failed seed also failed");
            }
            Err(e)
        }
    }
}

/// Seeds `count` patients only when the store holds none. Returns the number
/// created, which is zero for a populated store.
pub async fn seed_if_empty<S, P>(storage: &S, source: &mut P, count: usize) -> StorageResult<usize>
where
    S: TransactionProvider,
    P: PatientSource + Send,
{
    let existing = storage.count().await?;
    if existing > 0 {
        tracing::debug!(existing, "Store already populated, skipping seed");
        return Ok(0);
    }
    seed_patients(storage, source, count).await
}

async fn insert_batch<T, P>(tx: &mut T, source: &mut P, count: usize) -> StorageResult<usize>
where
    T: PatientTransaction + ?Sized,
    P: PatientSource + Send,
{
    let mut used = HashSet::new();
    for _ in 0..count {
        let patient = next_unique(source, &used)?;
        if let Some(pesel) = &patient.pesel {
            used.insert(pesel.clone());
        }
        tx.insert(patient).await?;
    }
    Ok(count)
}

/// Draws candidates until one has no PESEL or a PESEL not yet in `used`.
fn next_unique<P: PatientSource>(source: &mut P, used: &HashSet<String>) -> Result<NewPatient, SeedError> {
    let mut patient = source.next_patient();
    let mut retries = 0;
    while let Some(pesel) = patient.pesel.as_ref().filter(|p| used.contains(*p)) {
        if retries >= MAX_NATIONAL_ID_RETRIES {
            return Err(SeedError::UniquenessExhausted {
                attempts: retries,
                national_id: pesel.clone(),
            });
        }
        patient = source.next_patient();
        retries += 1;
    }
    Ok(patient)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPesel {
        calls: u32,
    }

    impl PatientSource for FixedPesel {
        fn next_patient(&mut self) -> NewPatient {
            self.calls += 1;
            NewPatient::new(format!("g-{}", self.calls), "Jan", "Nowak").with_pesel("44051401359")
        }
    }

    struct CollidesTwice {
        calls: u32,
    }

    impl PatientSource for CollidesTwice {
        fn next_patient(&mut self) -> NewPatient {
            self.calls += 1;
            let pesel = if self.calls <= 3 { "44051401359" } else { "02270803624" };
            NewPatient::new(format!("g-{}", self.calls), "Anna", "Nowak").with_pesel(pesel)
        }
    }

    #[test]
    fn test_next_unique_accepts_fresh_candidate() {
        let mut source = FixedPesel { calls: 0 };
        let patient = next_unique(&mut source, &HashSet::new()).unwrap();
        assert_eq!(patient.pesel.as_deref(), Some("44051401359"));
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn test_next_unique_retries_collisions() {
        let mut source = CollidesTwice { calls: 0 };
        let used = HashSet::from(["44051401359".to_string()]);
        let patient = next_unique(&mut source, &used).unwrap();
        assert_eq!(patient.pesel.as_deref(), Some("02270803624"));
        assert_eq!(source.calls, 4);
    }

    #[test]
    fn test_next_unique_exhausts_after_bound() {
        let mut source = FixedPesel { calls: 0 };
        let used = HashSet::from(["44051401359".to_string()]);
        let err = next_unique(&mut source, &used).unwrap_err();
        match err {
            SeedError::UniquenessExhausted {
                attempts,
                national_id,
            } => {
                assert_eq!(attempts, MAX_NATIONAL_ID_RETRIES);
                assert_eq!(national_id, "44051401359");
            }
            other => panic!("unexpected error: {}", other),
        }
        // One initial draw plus the bounded regenerations.
        assert_eq!(source.calls, MAX_NATIONAL_ID_RETRIES + 1);
    }
}
