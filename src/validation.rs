//! Field-level checks for phone data.
//!
//! Each `validate_*` function appends to a list of [`FieldError`]s instead of stopping at the
//! first problem, so a caller sees everything wrong with a record at once. The same checks run
//! on create, on the merged record after an update, and on every imported row.

use crate::model::{Phone, Platform};
use crate::pricing::round_half_up;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Joins errors as `field: message; field: message`.
pub fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Largest base price or override accepted, 1 000 000 000.00. Keeps fee division and
/// stock-value sums inside `Decimal` range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_215_752_192, 23, 0, false, 2);

pub fn validate_text(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be blank"));
    }
}

pub fn validate_base_price(value: Decimal, errors: &mut Vec<FieldError>) {
    if let Some(message) = price_problem(value) {
        errors.push(FieldError::new("base_price", message));
    }
}

pub fn validate_overrides(
    overrides: &BTreeMap<Platform, Option<Decimal>>,
    errors: &mut Vec<FieldError>,
) {
    for (platform, price) in overrides {
        if let Some(message) = price.and_then(price_problem) {
            errors.push(FieldError::new(
                format!("manual_overrides.{platform}"),
                message,
            ));
        }
    }
}

pub fn validate_phone(phone: &Phone) -> Vec<FieldError> {
    let mut errors = Vec::new();
    validate_text("model_name", &phone.model_name, &mut errors);
    validate_text("brand", &phone.brand, &mut errors);
    validate_base_price(phone.base_price, &mut errors);
    validate_overrides(&phone.manual_overrides, &mut errors);
    errors
}

// Upper bound first: rounding a value near `Decimal::MAX` can itself overflow.
fn price_problem(value: Decimal) -> Option<&'static str> {
    if value > MAX_PRICE {
        Some("must not exceed 1000000000.00")
    } else if round_half_up(value) <= Decimal::ZERO {
        Some("must be at least 0.01")
    } else {
        None
    }
}

/// Rounds money to cents (half-up) and trims free text. Blank tags are dropped.
pub fn normalize(phone: &mut Phone) {
    phone.model_name = phone.model_name.trim().to_string();
    phone.brand = phone.brand.trim().to_string();
    phone.base_price = round_half_up(phone.base_price);
    phone.tags = phone
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    for price in phone.manual_overrides.values_mut().flatten() {
        *price = round_half_up(*price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, PhoneCreate, PhoneId};
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn errors_for(params: PhoneCreate) -> Vec<FieldError> {
        validate_phone(&Phone::new(PhoneId(1), params))
    }

    #[test]
    fn valid_create_has_no_errors() {
        let params = PhoneCreate::new("iPhone 13", "Apple", Condition::Excellent, 2, d("420.00"));
        assert!(errors_for(params).is_empty());
    }

    #[test]
    fn every_problem_is_reported() {
        let params = PhoneCreate::new("  ", "", Condition::Fair, 0, d("0.004"))
            .with_override(Platform::Z, d("-3"));
        let fields: Vec<_> = errors_for(params)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec!["model_name", "brand", "base_price", "manual_overrides.Z"]
        );
    }

    #[test]
    fn prices_above_the_cap_are_rejected() {
        assert_eq!(MAX_PRICE, d("1000000000.00"));

        let at_cap = PhoneCreate::new("Vertu", "Vertu", Condition::New, 1, MAX_PRICE)
            .with_override(Platform::X, MAX_PRICE);
        assert!(errors_for(at_cap).is_empty());

        let huge = PhoneCreate::new("Vertu", "Vertu", Condition::New, 1, Decimal::MAX)
            .with_override(Platform::Y, d("1000000000.01"));
        let errors = errors_for(huge);
        assert_eq!(
            errors,
            vec![
                FieldError::new("base_price", "must not exceed 1000000000.00"),
                FieldError::new("manual_overrides.Y", "must not exceed 1000000000.00"),
            ]
        );
    }

    #[test]
    fn normalize_rounds_half_up() {
        let params = PhoneCreate::new(" Pixel 6 ", "Google", Condition::Good, 1, d("99.995"))
            .with_override(Platform::X, d("120.004"));
        let mut phone = Phone::new(PhoneId(1), params);
        normalize(&mut phone);
        assert_eq!(phone.model_name, "Pixel 6");
        assert_eq!(phone.base_price, d("100.00"));
        assert_eq!(phone.override_for(Platform::X), Some(d("120.00")));
    }

    #[test]
    fn describe_joins_messages() {
        let errors = vec![
            FieldError::new("brand", "must not be blank"),
            FieldError::new("base_price", "is missing"),
        ];
        assert_eq!(
            describe(&errors),
            "brand: must not be blank; base_price: is missing"
        );
    }
}
