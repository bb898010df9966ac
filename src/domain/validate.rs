//! Shared custom validators for create/update DTOs.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

/// International phone format: optional `+`, 7 to 15 digits
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex is valid"));

/// Validate a phone number field
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// Money fields must not be negative (salary, fee, price)
pub fn validate_non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        Err(ValidationError::new("negative_amount"))
    } else {
        Ok(())
    }
}

/// Payment amounts must be strictly positive
pub fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount > &Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("non_positive_amount"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_phone_formats() {
        assert!(validate_phone("+1234567890").is_ok());
        assert!(validate_phone("998901234567").is_ok());
        assert!(validate_phone("12-34").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(validate_non_negative_amount(&dec!(0)).is_ok());
        assert!(validate_non_negative_amount(&dec!(-0.01)).is_err());
        assert!(validate_positive_amount(&dec!(0)).is_err());
        assert!(validate_positive_amount(&dec!(25)).is_ok());
    }
}
