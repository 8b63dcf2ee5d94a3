//! Employee input validation.
//!
//! Names and rates arrive as free text from the admin form and from
//! spreadsheet imports. Everything that reaches the store and the report
//! calculation has passed through here.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::NewEmployee;

/// Trims a name and rejects it if nothing is left.
pub fn validate_name(name: &str) -> EngineResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid("name", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Parses an hourly rate.
///
/// The input is trimmed and must be a non-negative decimal number.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::parse_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_rate(" 350.50 ").unwrap(), Decimal::new(35050, 2));
/// assert!(parse_rate("-1").is_err());
/// assert!(parse_rate("abc").is_err());
/// ```
pub fn parse_rate(rate: &str) -> EngineResult<Decimal> {
    let trimmed = rate.trim();
    if trimmed.is_empty() {
        return Err(invalid("rate", "must not be empty"));
    }
    let value = Decimal::from_str(trimmed)
        .map_err(|_| invalid("rate", &format!("'{}' is not a number", trimmed)))?;
    validate_rate(value)
}

/// The highest hourly rate accepted: one billion per hour.
///
/// Keeps `hours * rate` and the report totals far inside `Decimal`'s range.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Rejects negative rates and rates above [`MAX_RATE`]. Any zero, including
/// `-0`, comes back as plain zero.
pub fn validate_rate(rate: Decimal) -> EngineResult<Decimal> {
    if rate.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if rate.is_sign_negative() {
        return Err(invalid("rate", "must not be negative"));
    }
    if rate > MAX_RATE {
        return Err(invalid("rate", &format!("must not exceed {}", MAX_RATE)));
    }
    Ok(rate)
}

/// Validates a name and a textual rate into a [`NewEmployee`].
pub fn validate_new_employee(name: &str, rate: &str) -> EngineResult<NewEmployee> {
    Ok(NewEmployee {
        name: validate_name(name)?,
        rate: parse_rate(rate)?,
    })
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn field_of(err: EngineError) -> String {
        match err {
            EngineError::InvalidEmployee { field, .. } => field,
            other => panic!("expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(validate_name("  Ivan Petrov \n").unwrap(), "Ivan Petrov");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(field_of(validate_name("   ").unwrap_err()), "name");
        assert_eq!(field_of(validate_name("").unwrap_err()), "name");
    }

    #[test]
    fn test_rate_parses_integers_and_decimals() {
        assert_eq!(parse_rate("300").unwrap(), dec("300"));
        assert_eq!(parse_rate("412.75").unwrap(), dec("412.75"));
        assert_eq!(parse_rate("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        assert_eq!(parse_rate("-0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_rate_rejections() {
        assert_eq!(field_of(parse_rate("").unwrap_err()), "rate");
        assert_eq!(field_of(parse_rate("  ").unwrap_err()), "rate");
        assert_eq!(field_of(parse_rate("twelve").unwrap_err()), "rate");
        assert_eq!(field_of(parse_rate("-5").unwrap_err()), "rate");
    }

    #[test]
    fn test_validate_rate_rejects_negative_decimal() {
        assert!(validate_rate(dec("-0.01")).is_err());
        assert!(validate_rate(dec("0.01")).is_ok());
    }

    #[test]
    fn test_rate_above_maximum_is_rejected() {
        assert_eq!(parse_rate("1000000000").unwrap(), MAX_RATE);
        assert_eq!(field_of(parse_rate("1000000000.01").unwrap_err()), "rate");
        assert_eq!(
            field_of(parse_rate("79228162514264337593543950335").unwrap_err()),
            "rate"
        );
        assert!(validate_rate(Decimal::MAX).is_err());
    }

    #[test]
    fn test_validate_new_employee() {
        let employee = validate_new_employee(" Anna ", " 250 ").unwrap();
        assert_eq!(employee.name, "Anna");
        assert_eq!(employee.rate, dec("250"));
    }

    #[test]
    fn test_validate_new_employee_reports_name_first() {
        let err = validate_new_employee("", "abc").unwrap_err();
        assert_eq!(field_of(err), "name");
    }
}
