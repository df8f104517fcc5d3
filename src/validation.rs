//! Local checks run before any request is sent

use crate::errors::{RentryError, ValidationKind};
use crate::utils::{char_len, safe_static_regex};
use crate::{define_regex, make_static};
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Accepted length of ids and edit codes
pub const ID_LENGTH: RangeInclusive<usize> = 2..=100;
pub const PASSWORD_LENGTH: RangeInclusive<usize> = 2..=100;
/// Longest text the service accepts
pub const MAX_TEXT_LENGTH: usize = 200_000;

define_regex!(ID_REGEX, ID_REGEX_TEXT, r"^[A-Za-z0-9_-]+$");

/// Checks that an id has an accepted length and only uses latin letters, digits,
/// underscores and hyphens
pub fn validate_id(id: &str) -> Result<(), RentryError> {
    if !ID_LENGTH.contains(&char_len(id)) {
        return Err(RentryError::validation(
            "id",
            ValidationKind::OutOfRange,
            "must have a length between 2 and 100 characters",
        ));
    }
    if !safe_static_regex(ID_REGEX.clone(), ID_REGEX_TEXT)?.is_match(id) {
        return Err(RentryError::validation(
            "id",
            ValidationKind::InvalidFormat,
            "must only contain latin letters, numbers, underscores or hyphens",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), RentryError> {
    if !PASSWORD_LENGTH.contains(&char_len(password)) {
        return Err(RentryError::validation(
            "password",
            ValidationKind::OutOfRange,
            "must have a length between 2 and 100 characters",
        ));
    }
    Ok(())
}

pub fn validate_text(text: &str) -> Result<(), RentryError> {
    if char_len(text) > MAX_TEXT_LENGTH {
        return Err(RentryError::validation(
            "text",
            ValidationKind::OutOfRange,
            "mustn't exceed 200,000 characters",
        ));
    }
    Ok(())
}

/// Validates every supplied value, in id, password, text order
pub fn validate_paste(
    id: Option<&str>,
    password: Option<&str>,
    text: Option<&str>,
) -> Result<(), RentryError> {
    if let Some(id) = id {
        validate_id(id)?;
    }
    if let Some(password) = password {
        validate_password(password)?;
    }
    if let Some(text) = text {
        validate_text(text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(result: Result<(), RentryError>) -> Option<ValidationKind> {
        result.err().and_then(|e| e.validation_kind())
    }

    #[test]
    fn accepts_ids_at_both_length_bounds() {
        assert!(validate_id("ab").is_ok());
        assert!(validate_id(&"a".repeat(100)).is_ok());
        assert!(validate_id("abc_123-XYZ").is_ok());
    }

    #[test]
    fn rejects_ids_outside_length_bounds() {
        assert_eq!(kind(validate_id("a")), Some(ValidationKind::OutOfRange));
        assert_eq!(kind(validate_id("")), Some(ValidationKind::OutOfRange));
        assert_eq!(
            kind(validate_id(&"a".repeat(101))),
            Some(ValidationKind::OutOfRange)
        );
    }

    #[test]
    fn rejects_ids_with_disallowed_characters() {
        for id in ["has space", "slash/es", "dot.ted", "ünï", "semi;colon"] {
            assert_eq!(
                kind(validate_id(id)),
                Some(ValidationKind::InvalidFormat),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn password_only_checks_length() {
        assert!(validate_password("p4ss word!").is_ok());
        assert_eq!(kind(validate_password("x")), Some(ValidationKind::OutOfRange));
        assert_eq!(
            kind(validate_password(&"x".repeat(101))),
            Some(ValidationKind::OutOfRange)
        );
    }

    #[test]
    fn text_limit_counts_characters() {
        assert!(validate_text(&"é".repeat(MAX_TEXT_LENGTH)).is_ok());
        assert_eq!(
            kind(validate_text(&"a".repeat(MAX_TEXT_LENGTH + 1))),
            Some(ValidationKind::OutOfRange)
        );
    }

    #[test]
    fn validate_paste_skips_absent_values() {
        assert!(validate_paste(None, None, None).is_ok());
        assert!(validate_paste(Some("abc"), None, Some("")).is_ok());
        assert!(validate_paste(None, Some("x"), None).is_err());
    }
}
