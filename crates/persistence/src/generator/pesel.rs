//! PESEL, the Polish national identification number.
//!
//! Layout of the eleven digits:
//!
//! ```text
//! Y Y M M D D S S S G K
//! ```
//!
//! `YY` is the year within its century and `MM` the month plus a century
//! offset (1800s +80, 1900s +0, 2000s +20, 2100s +40, 2200s +60). `SSS` is a
//! serial number, `G` is odd for men and even for women, and `K` is the check
//! digit computed from the first ten digits.

use chrono::{Datelike, NaiveDate};

use crate::types::{Gender, NATIONAL_ID_LENGTH};

const WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

/// (first year, month offset) per encodable century.
const CENTURIES: [(i32, u32); 5] = [(1800, 80), (1900, 0), (2000, 20), (2100, 40), (2200, 60)];

/// Largest accepted serial, see [`encode`].
pub const MAX_SERIAL: u16 = 9999;

/// Encodes a PESEL for a birth date and gender.
///
/// `serial` supplies the four digits following the date. Its last digit is
/// adjusted by one where needed so that its parity matches `gender`.
///
/// Returns `None` for dates outside 1800-2299 or a serial above [`MAX_SERIAL`].
///
/// ```
/// use chrono::NaiveDate;
/// use larvixon_persistence::generator::pesel;
/// use larvixon_persistence::types::Gender;
///
/// let date = NaiveDate::from_ymd_opt(2002, 7, 8).unwrap();
/// let value = pesel::encode(date, Gender::Female, 362).unwrap();
/// assert_eq!(value, "02270803624");
/// assert!(pesel::is_valid(&value));
/// ```
pub fn encode(birth_date: NaiveDate, gender: Gender, serial: u16) -> Option<String> {
    if serial > MAX_SERIAL {
        return None;
    }
    let year = birth_date.year();
    let (century, offset) = CENTURIES
        .iter()
        .copied()
        .find(|(start, _)| (*start..*start + 100).contains(&year))?;

    let parity = match gender {
        Gender::Male => 1,
        Gender::Female => 0,
    };
    let mut gender_digit = u32::from(serial % 10);
    if gender_digit % 2 != parity {
        gender_digit ^= 1;
    }

    let body = format!(
        "{:02}{:02}{:02}{:03}{}",
        year - century,
        birth_date.month() + offset,
        birth_date.day(),
        serial / 10,
        gender_digit
    );
    let check = checksum(&body)?;
    Some(format!("{}{}", body, check))
}

/// Computes the check digit over the first ten digits of `digits`.
///
/// Returns `None` if fewer than ten leading ASCII digits are present.
pub fn checksum(digits: &str) -> Option<u32> {
    let bytes = digits.as_bytes();
    if bytes.len() < WEIGHTS.len() {
        return None;
    }
    let mut sum = 0;
    for (byte, weight) in bytes.iter().zip(WEIGHTS) {
        if !byte.is_ascii_digit() {
            return None;
        }
        sum += u32::from(byte - b'0') * weight;
    }
    Some((10 - sum % 10) % 10)
}

/// Returns true if `value` is eleven digits with a correct check digit and a
/// real calendar date.
pub fn is_valid(value: &str) -> bool {
    if value.len() != NATIONAL_ID_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let Some(expected) = checksum(value) else {
        return false;
    };
    let actual = u32::from(value.as_bytes()[10] - b'0');
    expected == actual && birth_date_of(value).is_some()
}

/// Decodes the birth date.
pub fn birth_date_of(value: &str) -> Option<NaiveDate> {
    if value.len() < 6 || !value.is_ascii() {
        return None;
    }
    let yy: i32 = value[0..2].parse().ok()?;
    let mm: u32 = value[2..4].parse().ok()?;
    let dd: u32 = value[4..6].parse().ok()?;

    let (century, offset) = CENTURIES
        .iter()
        .copied()
        .find(|(_, offset)| (offset + 1..=offset + 12).contains(&mm))?;
    NaiveDate::from_ymd_opt(century + yy, mm - offset, dd)
}

/// Decodes the gender from the parity of the tenth digit.
pub fn gender_of(value: &str) -> Option<Gender> {
    let digit = value.as_bytes().get(9).filter(|b| b.is_ascii_digit())? - b'0';
    if digit % 2 == 1 {
        Some(Gender::Male)
    } else {
        Some(Gender::Female)
    }
}
