//! Patient search criteria.

use serde::{Deserialize, Serialize};

/// Maximum number of records returned by a search or batch lookup.
pub const SEARCH_RESULT_LIMIT: usize = 100;

/// Filter criteria for a patient search.
///
/// Every criterion is optional and an empty string counts as not supplied.
/// Supplied criteria are OR-combined: a record matches when any of them
/// matches. Name criteria match case-insensitive substrings, the national id
/// criterion matches a raw substring of the stored PESEL.
///
/// # Examples
///
/// ```
/// use larvixon_persistence::types::PatientSearch;
///
/// let criteria = PatientSearch::default().with_first_name("jan");
/// assert_eq!(criteria.first_name(), Some("jan"));
/// assert_eq!(criteria.last_name(), None);
///
/// let term = PatientSearch::term("440514");
/// assert_eq!(term.national_id(), Some("440514"));
/// assert_eq!(term.first_name(), Some("440514"));
///
/// assert!(PatientSearch::term("").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSearch {
    /// Substring of the given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Substring of the family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Substring of the PESEL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
}

impl PatientSearch {
    /// Creates criteria that apply one free-text term to every field.
    pub fn term(term: impl Into<String>) -> Self {
        let term = term.into();
        Self {
            first_name: Some(term.clone()),
            last_name: Some(term.clone()),
            national_id: Some(term),
        }
    }

    /// Sets the given-name criterion.
    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Sets the family-name criterion.
    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Sets the PESEL criterion.
    pub fn with_national_id(mut self, value: impl Into<String>) -> Self {
        self.national_id = Some(value.into());
        self
    }

    /// Returns the given-name criterion if it was supplied and is non-empty.
    pub fn first_name(&self) -> Option<&str> {
        non_empty(&self.first_name)
    }

    /// Returns the family-name criterion if it was supplied and is non-empty.
    pub fn last_name(&self) -> Option<&str> {
        non_empty(&self.last_name)
    }

    /// Returns the PESEL criterion if it was supplied and is non-empty.
    pub fn national_id(&self) -> Option<&str> {
        non_empty(&self.national_id)
    }

    /// Returns true if no effective criterion is set, i.e. the search
    /// matches every record.
    pub fn is_empty(&self) -> bool {
        self.first_name().is_none() && self.last_name().is_none() && self.national_id().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
