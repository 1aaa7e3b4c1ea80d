//! Patient entity types.
//!
//! [`PatientRecord`] is a row of the `patients` table as read back from the
//! store. [`NewPatient`] is the insertion payload produced by the generator;
//! the store assigns the numeric id.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Country code stored when a new patient does not carry one.
pub const DEFAULT_COUNTRY: &str = "PL";

/// Length of a PESEL number.
pub const NATIONAL_ID_LENGTH: usize = 11;

/// Administrative gender of a stored patient.
///
/// An unspecified gender is represented as `Option::None` on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Returns the stored code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender code '{}'", other)),
        }
    }
}

/// A patient row as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Sequential identity assigned by the store.
    pub id: i64,
    /// Opaque external reference, unique across all records.
    pub internal_guid: String,
    /// PESEL, unique when present.
    pub pesel: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Administrative gender.
    pub gender: Option<Gender>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Street and house number.
    pub address_line: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Two-letter country code.
    pub country: Option<String>,
}

impl PatientRecord {
    /// Returns the canonical resource id, `patient-` followed by the numeric id
    /// zero-padded to three digits.
    ///
    /// ```
    /// # use larvixon_persistence::types::PatientRecord;
    /// assert_eq!(PatientRecord::canonical_id_for(7), "patient-007");
    /// assert_eq!(PatientRecord::canonical_id_for(123), "patient-123");
    /// ```
    pub fn canonical_id(&self) -> String {
        Self::canonical_id_for(self.id)
    }

    /// Formats the canonical id for a numeric id.
    pub fn canonical_id_for(id: i64) -> String {
        format!("patient-{:03}", id)
    }
}

/// Fields of a patient that is about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    /// Opaque external reference.
    pub internal_guid: String,
    /// PESEL, if the patient has one.
    pub pesel: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Administrative gender.
    pub gender: Option<Gender>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Street and house number.
    pub address_line: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Two-letter country code, [`DEFAULT_COUNTRY`] when `None`.
    pub country: Option<String>,
}

impl NewPatient {
    /// Creates a payload with only the required fields set.
    pub fn new(
        internal_guid: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            internal_guid: internal_guid.into(),
            pesel: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            gender: None,
            phone: None,
            email: None,
            address_line: None,
            city: None,
            postal_code: None,
            country: None,
        }
    }

    /// Sets the PESEL.
    pub fn with_pesel(mut self, pesel: impl Into<String>) -> Self {
        self.pesel = Some(pesel.into());
        self
    }

    /// Sets the birth date.
    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Sets phone and email.
    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self.email = Some(email.into());
        self
    }

    /// Sets the postal address.
    pub fn with_address(
        mut self,
        line: Option<&str>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.address_line = line.map(str::to_string);
        self.city = Some(city.into());
        self.postal_code = Some(postal_code.into());
        self.country = Some(country.into());
        self
    }

    /// Country code that the store will persist.
    pub fn country_or_default(&self) -> &str {
        self.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }
}
