use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::RuleSet;

/// Validation errors for checkout form fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("this field is required")]
    Required,
    #[error("must be at least {min} characters")]
    TooShort { min: usize },
    #[error("postal code must be in the format 99999-999")]
    InvalidPostalCode,
    #[error("house number must be a number")]
    NotANumber,
    #[error("house number must be a whole number")]
    NotAnInteger,
    #[error("house number must be at least {min}")]
    BelowMinimum { min: u32 },
    #[error("invalid email address")]
    InvalidEmail,
    #[error("phone must be in the format (99) 99999-9999")]
    InvalidPhone,
    #[error("card number must be in the format 9999-9999-9999-9999")]
    CardNumberFormat,
    #[error("card number must have 13 to 19 digits")]
    CardNumberLength,
    #[error("CVV must have {} digits", digit_range(.min, .max))]
    CvvLength { min: usize, max: usize },
    #[error("invalid month")]
    InvalidMonth,
    #[error("invalid year")]
    InvalidYear,
    #[error("expiry must be in the format MM/YY")]
    InvalidExpiry,
    #[error("card expired")]
    Expired,
}

fn digit_range(min: &usize, max: &usize) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    }
}

static STRICT_POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-\d{3}$").expect("valid hardcoded regex"));

static RELAXED_POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("valid hardcoded regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("valid hardcoded regex")
});

// Two-digit area code, bare or fully parenthesized, optional leading 9 for
// mobiles, eight-digit subscriber.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\([1-9]{2}\)|[1-9]{2})\s?9?\d{4}[-\s]?\d{4}$")
        .expect("valid hardcoded regex")
});

static GROUPED_CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{4}$").expect("valid hardcoded regex"));

static MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])$").expect("valid hardcoded regex"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}$").expect("valid hardcoded regex"));

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/(\d{2})$").expect("valid hardcoded regex"));

/// Rejects empty values. Whitespace counts as content.
pub fn validate_required(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

/// Requires at least `min` characters (not bytes).
pub fn validate_min_len(value: &str, min: usize) -> Result<(), FieldError> {
    if value.chars().count() < min {
        Err(FieldError::TooShort { min })
    } else {
        Ok(())
    }
}

/// Validates a CEP (`12345-678`). The hyphen is optional under [`RuleSet::Relaxed`].
pub fn validate_postal_code(value: &str, rules: RuleSet) -> Result<(), FieldError> {
    let re = match rules {
        RuleSet::Strict => &STRICT_POSTAL_CODE_RE,
        RuleSet::Relaxed => &RELAXED_POSTAL_CODE_RE,
    };
    if re.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidPostalCode)
    }
}

/// Parses a house number: an integer of at least 1. Surrounding whitespace is ignored.
///
/// Any numeric literal with a whole value is accepted, so `1e2` is 100 and
/// `12.0` is 12.
pub fn validate_house_number(value: &str) -> Result<u32, FieldError> {
    let trimmed = value.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n < 1 => Err(FieldError::BelowMinimum { min: 1 }),
        Ok(n) => u32::try_from(n).map_err(|_| FieldError::NotANumber),
        Err(_) => match trimmed.parse::<f64>() {
            Ok(f) if !f.is_finite() => Err(FieldError::NotANumber),
            Ok(f) if f.fract() != 0.0 => Err(FieldError::NotAnInteger),
            Ok(f) if f < 1.0 => Err(FieldError::BelowMinimum { min: 1 }),
            Ok(f) if f <= f64::from(u32::MAX) => Ok(f as u32),
            _ => Err(FieldError::NotANumber),
        },
    }
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// Validates a Brazilian phone number, e.g. `(11) 91234-5678` or `1132345678`.
pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidPhone)
    }
}

/// Strips the separators a card number may be typed with.
pub fn card_digits(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, ' ' | '-')).collect()
}

/// Validates a card number.
///
/// [`RuleSet::Strict`] requires the grouped `9999-9999-9999-9999` format;
/// [`RuleSet::Relaxed`] accepts 13 to 19 digits with optional space or hyphen
/// separators.
pub fn validate_card_number(value: &str, rules: RuleSet) -> Result<(), FieldError> {
    match rules {
        RuleSet::Strict if GROUPED_CARD_NUMBER_RE.is_match(value) => Ok(()),
        RuleSet::Strict => Err(FieldError::CardNumberFormat),
        RuleSet::Relaxed => {
            let digits = card_digits(value);
            let all_digits = value
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-'));
            if all_digits && (13..=19).contains(&digits.len()) {
                Ok(())
            } else {
                Err(FieldError::CardNumberLength)
            }
        }
    }
}

/// Validates a card security code and returns it as a number.
pub fn validate_cvv(value: &str, rules: RuleSet) -> Result<u16, FieldError> {
    let (min, max) = match rules {
        RuleSet::Strict => (3, 3),
        RuleSet::Relaxed => (3, 4),
    };
    let err = FieldError::CvvLength { min, max };
    if !(min..=max).contains(&value.len()) || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(err);
    }
    value.parse().map_err(|_| err)
}

/// Validates a two-digit month (`01` to `12`).
pub fn validate_month(value: &str) -> Result<u8, FieldError> {
    if !MONTH_RE.is_match(value) {
        return Err(FieldError::InvalidMonth);
    }
    value.parse().map_err(|_| FieldError::InvalidMonth)
}

/// Validates a two-digit year.
pub fn validate_year(value: &str) -> Result<u8, FieldError> {
    if !YEAR_RE.is_match(value) {
        return Err(FieldError::InvalidYear);
    }
    value.parse().map_err(|_| FieldError::InvalidYear)
}

/// Parses an `MM/YY` expiry into `(month, year)`.
pub fn parse_expiry(value: &str) -> Result<(u8, u8), FieldError> {
    let caps = EXPIRY_RE.captures(value).ok_or(FieldError::InvalidExpiry)?;
    let month = caps[1].parse().map_err(|_| FieldError::InvalidExpiry)?;
    let year = caps[2].parse().map_err(|_| FieldError::InvalidExpiry)?;
    Ok((month, year))
}
