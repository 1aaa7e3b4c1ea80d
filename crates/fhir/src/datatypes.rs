//! General-purpose FHIR data types used by [`Patient`](crate::Patient).
//!
//! Only the elements the service populates are modelled. Code values are closed
//! enums serialized with their FHIR code strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// [IdentifierUse](https://hl7.org/fhir/R4/valueset-identifier-use.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    /// The identifier recommended for display and use in real-world interactions.
    Usual,
    /// The identifier considered to be most trusted for the identification of this item.
    Official,
    /// A temporary identifier.
    Temp,
    /// An identifier that was assigned in secondary use.
    Secondary,
    /// The identifier id no longer considered valid.
    Old,
}

/// [NameUse](https://hl7.org/fhir/R4/valueset-name-use.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameUse {
    /// Known as / conventional / the one you normally use.
    Usual,
    /// The formal name as registered in an official (government) registry.
    Official,
    /// A temporary name.
    Temp,
    /// A name that is used to address the person in an informal manner.
    Nickname,
    /// Anonymous assigned name, alias, or pseudonym.
    Anonymous,
    /// This name is no longer in use.
    Old,
    /// A name used prior to changing name because of marriage.
    Maiden,
}

/// [ContactPointSystem](https://hl7.org/fhir/R4/valueset-contact-point-system.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointSystem {
    /// Telephone.
    Phone,
    /// Fax.
    Fax,
    /// Email address.
    Email,
    /// Pager.
    Pager,
    /// A contact that is not a phone, fax, pager or email address and is expressed as a URL.
    Url,
    /// Short message service.
    Sms,
    /// Anything else.
    Other,
}

/// [ContactPointUse](https://hl7.org/fhir/R4/valueset-contact-point-use.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointUse {
    /// A communication contact point at a home.
    Home,
    /// An office contact point.
    Work,
    /// A temporary contact point.
    Temp,
    /// This contact point is no longer in use.
    Old,
    /// A telecommunication device that moves and stays with its owner.
    Mobile,
}

/// [AddressUse](https://hl7.org/fhir/R4/valueset-address-use.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUse {
    /// A communication address at a home.
    Home,
    /// An office address.
    Work,
    /// A temporary address.
    Temp,
    /// This address is no longer in use.
    Old,
    /// An address to be used to send bills, invoices, receipts etc.
    Billing,
}

macro_rules! code_display {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match serde_json::to_value(self) {
                    Ok(serde_json::Value::String(code)) => f.write_str(&code),
                    _ => Err(fmt::Error),
                }
            }
        }
    };
}

code_display!(IdentifierUse);
code_display!(NameUse);
code_display!(ContactPointSystem);
code_display!(ContactPointUse);
code_display!(AddressUse);

/// [Identifier](https://hl7.org/fhir/R4/datatypes.html#Identifier)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Purpose of this identifier.
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<IdentifierUse>,
    /// The namespace for the identifier value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The value that is unique.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Identifier {
    /// Creates an official identifier in the given naming system.
    pub fn official(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            use_: Some(IdentifierUse::Official),
            system: Some(system.into()),
            value: Some(value.into()),
        }
    }
}

/// [HumanName](https://hl7.org/fhir/R4/datatypes.html#HumanName)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanName {
    /// Purpose of this name.
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<NameUse>,
    /// Family name (often called 'Surname').
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Given names (not always 'first').
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
}

impl HumanName {
    /// Creates an official name with a single given name.
    pub fn official(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            use_: Some(NameUse::Official),
            family: Some(family.into()),
            given: vec![given.into()],
        }
    }
}

/// [ContactPoint](https://hl7.org/fhir/R4/datatypes.html#ContactPoint)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPoint {
    /// phone | fax | email | pager | url | sms | other
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<ContactPointSystem>,
    /// The actual contact point details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// home | work | temp | old | mobile
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<ContactPointUse>,
}

impl ContactPoint {
    /// Creates a contact point.
    pub fn new(system: ContactPointSystem, value: impl Into<String>, use_: ContactPointUse) -> Self {
        Self {
            system: Some(system),
            value: Some(value.into()),
            use_: Some(use_),
        }
    }
}

/// [Address](https://hl7.org/fhir/R4/datatypes.html#Address)
///
/// `line` is always serialized, as `[]` when the address has no street line.
/// Consumers of the service rely on the key being present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// home | work | temp | old | billing
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<AddressUse>,
    /// Street name, number, direction & P.O. Box etc.
    #[serde(default)]
    pub line: Vec<String>,
    /// Name of city, town etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code for area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country (e.g. can be ISO 3166 2 or 3 letter code).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}
