//! The FHIR [Bundle](https://hl7.org/fhir/R4/bundle.html) resource.

use serde::{Deserialize, Serialize};

use crate::patient::Patient;

/// Bundle types produced by this service.
///
/// Only search results are ever returned, so `searchset` is the single kind
/// modelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    /// Search results bundle.
    #[default]
    Searchset,
}

impl BundleType {
    /// Returns the FHIR code string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleType::Searchset => "searchset",
        }
    }
}

/// An entry in a Bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// URI for the resource.
    pub full_url: String,
    /// The resource itself.
    pub resource: Patient,
}

impl BundleEntry {
    /// Creates a new entry.
    pub fn new(full_url: impl Into<String>, resource: Patient) -> Self {
        Self {
            full_url: full_url.into(),
            resource,
        }
    }
}

/// A container for a collection of resources.
///
/// `entry` is always serialized; an empty search produces `"entry": []`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub struct Bundle {
    /// Indicates the purpose of this bundle.
    #[serde(rename = "type")]
    pub type_: BundleType,
    /// Number of resources in the bundle.
    pub total: usize,
    /// Entries in the bundle.
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Creates a searchset bundle whose total is the number of entries.
    pub fn searchset(entry: Vec<BundleEntry>) -> Self {
        Self {
            type_: BundleType::Searchset,
            total: entry.len(),
            entry,
        }
    }

    /// Returns true if the bundle has no entries.
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Iterates over the resources in entry order.
    pub fn resources(&self) -> impl Iterator<Item = &Patient> {
        self.entry.iter().map(|entry| &entry.resource)
    }
}
