//! Core types for the persistence layer.
//!
//! - [`PatientRecord`] - A stored patient row
//! - [`NewPatient`] - The insertion payload for a patient
//! - [`PatientSearch`] - Optional, OR-combined search criteria
//!
//! # Examples
//!
//! ```
//! use larvixon_persistence::types::{Gender, NewPatient, PatientSearch, SEARCH_RESULT_LIMIT};
//!
//! let patient = NewPatient::new("0b6c0c1e-1d43-4d52-9d3b-5f3f2f1a7e10", "Janina", "Kowalska")
//!     .with_gender(Gender::Female);
//! assert_eq!(patient.country_or_default(), "PL");
//!
//! let criteria = PatientSearch::default().with_first_name("jan");
//! assert!(!criteria.is_empty());
//! assert_eq!(SEARCH_RESULT_LIMIT, 100);
//! ```

mod patient;
mod search;

pub use patient::{DEFAULT_COUNTRY, Gender, NATIONAL_ID_LENGTH, NewPatient, PatientRecord};
pub use search::{PatientSearch, SEARCH_RESULT_LIMIT};
