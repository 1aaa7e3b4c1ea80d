//! Synthetic patient generation.
//!
//! [`PatientGenerator`] produces realistic Polish demographics for seeding
//! and testing. The random source is an explicitly passed handle, so a
//! generator built with [`PatientGenerator::from_seed`] reproduces the same
//! sequence of patients on every run.
//!
//! # Example
//!
//! ```
//! use larvixon_persistence::generator::{PatientGenerator, PatientSource};
//!
//! let mut first = PatientGenerator::from_seed(42);
//! let mut second = PatientGenerator::from_seed(42);
//! assert_eq!(first.next_patient(), second.next_patient());
//! ```

pub mod pesel;

mod names;

use chrono::{Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SeedError;
use crate::types::{DEFAULT_COUNTRY, Gender, NewPatient};

/// Upper bound accepted for [`GeneratorConfig::max_age`].
pub const MAX_AGE: u32 = 150;

/// A source of patients to insert.
///
/// Seeding pulls one candidate at a time and asks for another when a
/// candidate's PESEL collides with one already accepted.
pub trait PatientSource {
    /// Produces the next candidate patient.
    fn next_patient(&mut self) -> NewPatient;
}

/// Configuration for [`PatientGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Probability in `[0, 1]` that a generated patient has a PESEL.
    #[serde(default = "default_national_id_probability")]
    pub national_id_probability: f64,

    /// Country code written to every address.
    #[serde(default = "default_country")]
    pub country: String,

    /// Date that ages are measured from. Today when `None`.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    /// Youngest generated age in years.
    #[serde(default = "default_min_age")]
    pub min_age: u32,

    /// Oldest generated age in years.
    #[serde(default = "default_max_age")]
    pub max_age: u32,
}

fn default_national_id_probability() -> f64 {
    0.1
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_min_age() -> u32 {
    1
}

fn default_max_age() -> u32 {
    100
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            national_id_probability: default_national_id_probability(),
            country: default_country(),
            reference_date: None,
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the PESEL probability.
    pub fn with_national_id_probability(mut self, probability: f64) -> Self {
        self.national_id_probability = probability;
        self
    }

    /// Fixes the date ages are measured from.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SeedError> {
        if !(0.0..=1.0).contains(&self.national_id_probability) {
            return Err(SeedError::InvalidConfig {
                message: format!(
                    "national_id_probability must be within [0, 1], got {}",
                    self.national_id_probability
                ),
            });
        }
        if self.max_age > MAX_AGE {
            return Err(SeedError::InvalidConfig {
                message: format!("max_age must not exceed {}, got {}", MAX_AGE, self.max_age),
            });
        }
        if self.min_age > self.max_age {
            return Err(SeedError::InvalidConfig {
                message: format!(
                    "min_age ({}) must not exceed max_age ({})",
                    self.min_age, self.max_age
                ),
            });
        }
        if self.country.len() != 2 {
            return Err(SeedError::InvalidConfig {
                message: format!("country must be a 2-letter code, got '{}'", self.country),
            });
        }
        Ok(())
    }
}

/// Generates synthetic Polish patients.
#[derive(Debug)]
pub struct PatientGenerator<R: Rng = StdRng> {
    rng: R,
    config: GeneratorConfig,
    reference_date: NaiveDate,
}

impl PatientGenerator<StdRng> {
    /// Creates a deterministic generator with the default configuration.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PatientGenerator<R> {
    /// Creates a generator with the default configuration.
    pub fn new(rng: R) -> Self {
        let config = GeneratorConfig::default();
        Self {
            rng,
            reference_date: Utc::now().date_naive(),
            config,
        }
    }

    /// Creates a generator with a custom configuration.
    pub fn with_config(rng: R, config: GeneratorConfig) -> Result<Self, SeedError> {
        config.validate()?;
        let reference_date = config
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());
        Ok(Self {
            rng,
            config,
            reference_date,
        })
    }

    /// Returns the generator configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one synthetic patient.
    pub fn generate(&mut self) -> NewPatient {
        let gender = if self.rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };
        let (first_name, last_name) = self.name(gender);
        let birth_date = self.birth_date();

        let pesel = match birth_date {
            Some(date) if self.rng.gen_bool(self.config.national_id_probability) => {
                let serial = self.rng.gen_range(0..=pesel::MAX_SERIAL);
                pesel::encode(date, gender, serial)
            }
            _ => None,
        };

        let (city, postal_prefix) = pick(&mut self.rng, names::CITIES, ("Warszawa", "0"));
        let street = pick(&mut self.rng, names::STREETS, "Polna");
        let address_line = if self.rng.gen_bool(0.5) {
            format!("ul. {} {}", street, self.rng.gen_range(1..=150))
        } else {
            format!(
                "ul. {} {}/{}",
                street,
                self.rng.gen_range(1..=150),
                self.rng.gen_range(1..=60)
            )
        };
        let postal_code = format!(
            "{}{}-{:03}",
            postal_prefix,
            self.rng.gen_range(0..=9),
            self.rng.gen_range(0..=999)
        );

        let phone = format!(
            "+48 {} {:03} {:03}",
            self.rng.gen_range(500..=899),
            self.rng.gen_range(0..=999),
            self.rng.gen_range(0..=999)
        );
        let domain = pick(&mut self.rng, names::EMAIL_DOMAINS, "example.pl");
        let email = format!(
            "{}.{}{}@{}",
            names::ascii_fold(first_name),
            names::ascii_fold(last_name),
            self.rng.gen_range(1..=99),
            domain
        );

        let guid = uuid::Builder::from_random_bytes(self.rng.r#gen()).into_uuid();

        NewPatient {
            internal_guid: guid.to_string(),
            pesel,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            gender: Some(gender),
            phone: Some(phone),
            email: Some(email),
            address_line: Some(address_line),
            city: Some(city.to_string()),
            postal_code: Some(postal_code),
            country: Some(self.config.country.clone()),
        }
    }

    fn name(&mut self, gender: Gender) -> (&'static str, &'static str) {
        let (male_last, female_last) = pick(&mut self.rng, names::LAST_NAMES, ("Nowak", "Nowak"));
        match gender {
            Gender::Male => (pick(&mut self.rng, names::MALE_FIRST_NAMES, "Jan"), male_last),
            Gender::Female => (
                pick(&mut self.rng, names::FEMALE_FIRST_NAMES, "Anna"),
                female_last,
            ),
        }
    }

    /// Uniform over the days on which a person is between `min_age` and
    /// `max_age` years old at the reference date.
    fn birth_date(&mut self) -> Option<NaiveDate> {
        let latest = self
            .reference_date
            .checked_sub_months(Months::new(self.config.min_age.checked_mul(12)?))?;
        let max_months = self.config.max_age.checked_add(1)?.checked_mul(12)?;
        let earliest = self
            .reference_date
            .checked_sub_months(Months::new(max_months))?
            .succ_opt()?;
        let span = (latest - earliest).num_days();
        if span < 0 {
            return None;
        }
        earliest.checked_add_days(chrono::Days::new(self.rng.gen_range(0..=span) as u64))
    }
}

impl<R: Rng> PatientSource for PatientGenerator<R> {
    fn next_patient(&mut self) -> NewPatient {
        self.generate()
    }
}

fn pick<R: Rng, T: Copy>(rng: &mut R, items: &[T], fallback: T) -> T {
    items.choose(rng).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn generator(seed: u64, probability: f64) -> PatientGenerator {
        let config = GeneratorConfig::default()
            .with_national_id_probability(probability)
            .with_reference_date(reference());
        PatientGenerator::with_config(StdRng::seed_from_u64(seed), config).unwrap()
    }

    #[test]
    fn test_same_seed_same_patients() {
        let mut a = generator(7, 0.5);
        let mut b = generator(7, 0.5);
        for _ in 0..20 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_required_fields_populated() {
        let mut generator = generator(1, 0.1);
        for _ in 0..50 {
            let patient = generator.generate();
            assert!(!patient.first_name.is_empty());
            assert!(!patient.last_name.is_empty());
            assert!(uuid::Uuid::parse_str(&patient.internal_guid).is_ok());
            assert!(patient.phone.as_deref().unwrap().starts_with("+48 "));
            assert!(patient.email.as_deref().unwrap().contains('@'));
            assert_eq!(patient.country.as_deref(), Some("PL"));

            let postal = patient.postal_code.unwrap();
            assert_eq!(postal.len(), 6);
            assert_eq!(&postal[2..3], "-");
        }
    }

    #[test]
    fn test_birth_date_within_age_range() {
        let mut generator = generator(3, 0.0);
        let latest = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let earliest = NaiveDate::from_ymd_opt(1924, 6, 2).unwrap();
        for _ in 0..200 {
            let birth_date = generator.generate().birth_date.unwrap();
            assert!(birth_date >= earliest && birth_date <= latest, "{}", birth_date);
        }
    }

    #[test]
    fn test_pesel_matches_birth_date_and_gender() {
        let mut generator = generator(11, 1.0);
        for _ in 0..100 {
            let patient = generator.generate();
            let value = patient.pesel.as_deref().unwrap();
            assert!(pesel::is_valid(value), "{}", value);
            assert_eq!(pesel::birth_date_of(value), patient.birth_date);
            assert_eq!(pesel::gender_of(value), patient.gender);
        }
    }

    #[test]
    fn test_zero_probability_never_assigns_pesel() {
        let mut generator = generator(5, 0.0);
        assert!((0..100).all(|_| generator.generate().pesel.is_none()));
    }

    #[test]
    fn test_default_probability() {
        let mut generator = generator(9, default_national_id_probability());
        let with_pesel = (0..1000)
            .filter(|_| generator.generate().pesel.is_some())
            .count();
        assert!((50..=160).contains(&with_pesel), "{}", with_pesel);
    }

    #[test]
    fn test_feminine_surnames() {
        let mut generator = generator(21, 0.0);
        for _ in 0..100 {
            let patient = generator.generate();
            if patient.gender == Some(Gender::Female) {
                assert!(!patient.last_name.ends_with("ski"));
                assert!(!patient.last_name.ends_with("cki"));
            }
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = GeneratorConfig::default().with_national_id_probability(1.5);
        assert!(matches!(
            config.validate(),
            Err(SeedError::InvalidConfig { .. })
        ));

        let config = GeneratorConfig {
            min_age: 50,
            max_age: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_max_age_is_bounded() {
        let config = GeneratorConfig {
            max_age: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SeedError::InvalidConfig { .. })
        ));
        assert!(PatientGenerator::with_config(StdRng::seed_from_u64(1), config).is_err());

        let config = GeneratorConfig {
            max_age: MAX_AGE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_age_from_json_is_rejected() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"max_age": 4294967295}"#).unwrap();
        assert!(config.validate().is_err());
    }
}
