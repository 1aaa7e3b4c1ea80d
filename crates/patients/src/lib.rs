//! # larvixon-patients
//!
//! Patient search-and-transform for the Larvixon patients service.
//!
//! This crate turns stored patients into FHIR resources:
//!
//! - [`to_fhir_patient`] maps one stored record to a FHIR `Patient`
//! - [`search_bundle`] packages mapped patients into a `searchset` bundle
//! - [`PatientService`] runs searches, batch lookups and single reads against
//!   any [`PatientStorage`](larvixon_persistence::PatientStorage)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use larvixon_patients::PatientService;
//! use larvixon_persistence::PatientSearch;
//! use larvixon_persistence::backends::sqlite::SqliteBackend;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("data/patients.db")?;
//! backend.init_schema()?;
//!
//! let service = PatientService::new(Arc::new(backend));
//! let bundle = service.search(&PatientSearch::default().with_last_name("nowak")).await?;
//! println!("{}", serde_json::to_string_pretty(&bundle)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bundle;
pub mod mapper;
pub mod service;

pub use bundle::search_bundle;
pub use mapper::to_fhir_patient;
pub use service::{BatchLookup, PatientService};
