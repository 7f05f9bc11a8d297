//! Format rules applied to raw console text before it reaches the registry.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BankError, Field};
use crate::Amount;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is a valid regex"));

/// Trims `raw` and checks it against the email format.
pub fn email(raw: &str) -> Result<String, BankError> {
    let email = raw.trim();
    if EMAIL_PATTERN.is_match(email) {
        Ok(email.to_string())
    } else {
        Err(BankError::validation(
            Field::Email,
            format!("'{}' is not a valid email address", email),
        ))
    }
}

/// Trims `raw` and checks that exactly ten digits remain.
pub fn phone_number(raw: &str) -> Result<String, BankError> {
    let phone = raw.trim();
    if PHONE_PATTERN.is_match(phone) {
        Ok(phone.to_string())
    } else {
        Err(BankError::validation(
            Field::PhoneNumber,
            format!("'{}' must be exactly 10 digits", phone),
        ))
    }
}

/// Parses the whole trimmed text as a signed integer. Menu choices and
/// account numbers are read this way; range checks are up to the caller.
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Parses the whole trimmed text as a decimal amount. Scientific notation is
/// not accepted.
pub fn parse_amount(raw: &str) -> Option<Amount> {
    Amount::from_str(raw.trim()).ok()
}
