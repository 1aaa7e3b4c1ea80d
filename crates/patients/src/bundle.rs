//! Assembling search result bundles.

use larvixon_fhir::{Bundle, BundleEntry, Patient};

/// Prefix of every entry's `fullUrl`.
pub const FULL_URL_PREFIX: &str = "urn:uuid:";

/// Packages resources into a `searchset` bundle.
///
/// Each entry's `fullUrl` is `urn:uuid:` followed by the resource id, and
/// `total` is the number of entries.
///
/// ```
/// use larvixon_fhir::Patient;
/// use larvixon_patients::search_bundle;
///
/// let bundle = search_bundle(vec![Patient {
///     id: Some("patient-003".to_string()),
///     ..Default::default()
/// }]);
/// assert_eq!(bundle.total, 1);
/// assert_eq!(bundle.entry[0].full_url, "urn:uuid:patient-003");
/// ```
pub fn search_bundle(patients: Vec<Patient>) -> Bundle {
    let entry = patients
        .into_iter()
        .map(|patient| {
            let full_url = format!(
                "{}{}",
                FULL_URL_PREFIX,
                patient.id.as_deref().unwrap_or_default()
            );
            BundleEntry::new(full_url, patient)
        })
        .collect();
    Bundle::searchset(entry)
}
