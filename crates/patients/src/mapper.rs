//! Mapping stored patients to FHIR `Patient` resources.

use larvixon_fhir::{
    Address, AddressUse, AdministrativeGender, ContactPoint, ContactPointSystem,
    ContactPointUse, HumanName, Identifier, PESEL_SYSTEM, Patient,
};
use larvixon_persistence::PatientRecord;
use larvixon_persistence::types::Gender;

/// Converts a stored patient into a FHIR `Patient`.
///
/// Every absent optional element is left out of the resource. The one
/// exception is `Address.line`, which is an empty array when the record has
/// no street line but some other address field.
///
/// # Example
///
/// ```
/// use larvixon_patients::to_fhir_patient;
/// use larvixon_persistence::PatientRecord;
///
/// let record = PatientRecord {
///     id: 7,
///     internal_guid: "7f0c".to_string(),
///     pesel: None,
///     first_name: "Jan".to_string(),
///     last_name: "Kowalski".to_string(),
///     birth_date: None,
///     gender: None,
///     phone: None,
///     email: None,
///     address_line: None,
///     city: None,
///     postal_code: None,
///     country: None,
/// };
///
/// let patient = to_fhir_patient(&record);
/// assert_eq!(patient.id.as_deref(), Some("patient-007"));
/// assert!(patient.identifier.is_empty());
/// assert!(patient.address.is_empty());
/// ```
pub fn to_fhir_patient(record: &PatientRecord) -> Patient {
    let identifier = non_empty(&record.pesel)
        .map(|pesel| vec![Identifier::official(PESEL_SYSTEM, pesel)])
        .unwrap_or_default();

    let mut telecom = Vec::new();
    if let Some(phone) = non_empty(&record.phone) {
        telecom.push(ContactPoint::new(
            ContactPointSystem::Phone,
            phone,
            ContactPointUse::Mobile,
        ));
    }
    if let Some(email) = non_empty(&record.email) {
        telecom.push(ContactPoint::new(
            ContactPointSystem::Email,
            email,
            ContactPointUse::Home,
        ));
    }

    Patient {
        id: Some(record.canonical_id()),
        identifier,
        name: vec![HumanName::official(&record.last_name, &record.first_name)],
        telecom,
        gender: record.gender.map(administrative_gender),
        birth_date: record.birth_date,
        address: address(record).into_iter().collect(),
    }
}

fn administrative_gender(gender: Gender) -> AdministrativeGender {
    match gender {
        Gender::Male => AdministrativeGender::Male,
        Gender::Female => AdministrativeGender::Female,
    }
}

fn address(record: &PatientRecord) -> Option<Address> {
    let line: Vec<String> = non_empty(&record.address_line)
        .map(str::to_string)
        .into_iter()
        .collect();
    let city = non_empty(&record.city).map(str::to_string);
    let postal_code = non_empty(&record.postal_code).map(str::to_string);
    let country = non_empty(&record.country).map(str::to_string);

    if line.is_empty() && city.is_none() && postal_code.is_none() && country.is_none() {
        return None;
    }

    Some(Address {
        use_: Some(AddressUse::Home),
        line,
        city,
        postal_code,
        country,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record(id: i64) -> PatientRecord {
        PatientRecord {
            id,
            internal_guid: format!("guid-{}", id),
            pesel: None,
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
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

    #[test]
    fn test_canonical_id() {
        assert_eq!(to_fhir_patient(&record(5)).id.as_deref(), Some("patient-005"));
        assert_eq!(to_fhir_patient(&record(123)).id.as_deref(), Some("patient-123"));
        assert_eq!(to_fhir_patient(&record(1234)).id.as_deref(), Some("patient-1234"));
    }

    #[test]
    fn test_minimal_record() {
        let value = serde_json::to_value(to_fhir_patient(&record(1))).unwrap();
        assert_eq!(
            value,
            json!({
                "resourceType": "Patient",
                "id": "patient-001",
                "name": [{"use": "official", "family": "Kowalski", "given": ["Jan"]}]
            })
        );
    }

    #[test]
    fn test_full_record() {
        let full = PatientRecord {
            pesel: Some("02270803624".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2002, 7, 8),
            gender: Some(Gender::Female),
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            phone: Some("+48 512 345 678".to_string()),
            email: Some("anna.nowak@example.pl".to_string()),
            address_line: Some("ul. Polna 3".to_string()),
            city: Some("Kraków".to_string()),
            postal_code: Some("30-001".to_string()),
            country: Some("PL".to_string()),
            ..record(42)
        };

        let value = serde_json::to_value(to_fhir_patient(&full)).unwrap();
        assert_eq!(
            value,
            json!({
                "resourceType": "Patient",
                "id": "patient-042",
                "identifier": [{
                    "use": "official",
                    "system": "http://hl7.org/fhir/sid/pesel",
                    "value": "02270803624"
                }],
                "name": [{"use": "official", "family": "Nowak", "given": ["Anna"]}],
                "telecom": [
                    {"system": "phone", "value": "+48 512 345 678", "use": "mobile"},
                    {"system": "email", "value": "anna.nowak@example.pl", "use": "home"}
                ],
                "gender": "female",
                "birthDate": "2002-07-08",
                "address": [{
                    "use": "home",
                    "line": ["ul. Polna 3"],
                    "city": "Kraków",
                    "postalCode": "30-001",
                    "country": "PL"
                }]
            })
        );
    }

    #[test]
    fn test_no_pesel_omits_identifier() {
        let value = serde_json::to_value(to_fhir_patient(&record(3))).unwrap();
        assert!(value.get("identifier").is_none());
    }

    #[test]
    fn test_missing_address_line_is_empty_array() {
        let partial = PatientRecord {
            city: Some("Gdańsk".to_string()),
            postal_code: Some("80-001".to_string()),
            country: Some("PL".to_string()),
            ..record(9)
        };
        let value = serde_json::to_value(to_fhir_patient(&partial)).unwrap();
        assert_eq!(
            value["address"],
            json!([{"use": "home", "line": [], "city": "Gdańsk", "postalCode": "80-001", "country": "PL"}])
        );
    }

    #[test]
    fn test_telecom_only_when_present() {
        let phone_only = PatientRecord {
            phone: Some("+48 600 100 200".to_string()),
            email: Some(String::new()),
            ..record(4)
        };
        let patient = to_fhir_patient(&phone_only);
        assert_eq!(patient.telecom.len(), 1);
        assert_eq!(patient.telecom[0].system, Some(ContactPointSystem::Phone));

        let value = serde_json::to_value(to_fhir_patient(&record(4))).unwrap();
        assert!(value.get("telecom").is_none());
    }

    #[test]
    fn test_gender_and_birth_date_omitted_when_absent() {
        let value = serde_json::to_value(to_fhir_patient(&record(6))).unwrap();
        assert!(value.get("gender").is_none());
        assert!(value.get("birthDate").is_none());

        let male = PatientRecord {
            gender: Some(Gender::Male),
            ..record(6)
        };
        assert_eq!(
            to_fhir_patient(&male).gender,
            Some(AdministrativeGender::Male)
        );
    }
}
