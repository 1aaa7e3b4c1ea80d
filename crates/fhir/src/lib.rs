//! # larvixon-fhir - FHIR R4 wire model subset
//!
//! Strongly typed serde models for the part of [FHIR R4](https://hl7.org/fhir/R4/)
//! that the Larvixon patients service produces:
//!
//! - [`Patient`] with [`Identifier`], [`HumanName`], [`ContactPoint`] and [`Address`]
//! - [`Bundle`] of type `searchset` with [`BundleEntry`] items
//!
//! This is not a complete FHIR implementation. Optional elements are modelled as
//! `Option`/`Vec` and skipped during serialization when absent, so the JSON never
//! carries `null` for a missing element. `Address.line` and `Bundle.entry` are the
//! two exceptions and are always written, as an empty array when there is nothing
//! to put in them.
//!
//! ```
//! use larvixon_fhir::{HumanName, Patient};
//!
//! let patient = Patient {
//!     id: Some("patient-007".to_string()),
//!     name: vec![HumanName::official("Kowalski", "Jan")],
//!     ..Default::default()
//! };
//!
//! let json = serde_json::to_value(&patient).unwrap();
//! assert_eq!(json["resourceType"], "Patient");
//! assert_eq!(json["name"][0]["use"], "official");
//! assert!(json.get("identifier").is_none());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bundle;
pub mod datatypes;
pub mod patient;

pub use bundle::{Bundle, BundleEntry, BundleType};
pub use datatypes::{
    Address, AddressUse, ContactPoint, ContactPointSystem, ContactPointUse, HumanName,
    Identifier, IdentifierUse, NameUse,
};
pub use patient::{AdministrativeGender, Patient};

/// Naming system URI for the Polish national identification number (PESEL).
pub const PESEL_SYSTEM: &str = "http://hl7.org/fhir/sid/pesel";
