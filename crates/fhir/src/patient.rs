//! The FHIR [Patient](https://hl7.org/fhir/R4/patient.html) resource.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datatypes::{Address, ContactPoint, HumanName, Identifier};

/// [AdministrativeGender](https://hl7.org/fhir/R4/valueset-administrative-gender.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other.
    Other,
    /// Unknown.
    Unknown,
}

impl AdministrativeGender {
    /// Returns the FHIR code string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdministrativeGender::Male => "male",
            AdministrativeGender::Female => "female",
            AdministrativeGender::Other => "other",
            AdministrativeGender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AdministrativeGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demographics and other administrative information about an individual.
///
/// Serializes with `"resourceType": "Patient"`. Empty repeating elements and
/// missing single elements are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resourceType", rename_all = "camelCase")]
pub struct Patient {
    /// Logical id of this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// An identifier for this patient.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    /// A name associated with the patient.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,
    /// A contact detail for the individual.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
    /// male | female | other | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,
    /// The date of birth for the individual.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// An address for the individual.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

impl Patient {
    /// Returns the first identifier issued by `system`, if any.
    pub fn identifier_value(&self, system: &str) -> Option<&str> {
        self.identifier
            .iter()
            .find(|identifier| identifier.system.as_deref() == Some(system))
            .and_then(|identifier| identifier.value.as_deref())
    }
}
