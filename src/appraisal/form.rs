//! Boundary between loosely typed callers and the calculator.
//!
//! Forms arrive with numbers either as JSON numbers or as numeric strings. All
//! coercion and range checks happen here so [`AppraisalInput`] only ever
//! carries strict numeric values.

use serde::{Deserialize, Serialize};

use super::calculator::AppraisalInput;
use super::table::MAX_AGE;
use crate::validation::FieldErrors;

/// A numeric form field as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn parse(&self) -> Result<f64, String> {
        match self {
            FieldValue::Number(value) => Ok(*value),
            FieldValue::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err("is required".to_string());
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| format!("'{trimmed}' is not a number"))
            }
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Appraisal request as entered by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalForm {
    pub owner: String,
    pub location: String,
    pub replacement_value: FieldValue,
    pub residual_value: FieldValue,
    pub property_age: FieldValue,
    pub condition_rating: FieldValue,
    pub land_area: FieldValue,
    pub land_unit_value: FieldValue,
    /// Omitted when the caller wants the current feed rate.
    #[serde(default)]
    pub exchange_rate: Option<FieldValue>,
}

/// Form that passed validation. The exchange rate stays optional until the
/// caller decides whether to poll the rate feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAppraisal {
    pub owner: String,
    pub location: String,
    pub exchange_rate: Option<f64>,
    base: AppraisalInput,
}

impl ValidatedAppraisal {
    pub fn input_with_rate(&self, exchange_rate: f64) -> AppraisalInput {
        AppraisalInput {
            exchange_rate,
            ..self.base
        }
    }

    /// Input using the form's own rate, or no conversion when it has none.
    pub fn input(&self) -> AppraisalInput {
        self.input_with_rate(self.exchange_rate.unwrap_or(0.0))
    }
}

impl AppraisalForm {
    /// Checks every field, coercing numeric strings, and reports all failures at once.
    pub fn validate(&self) -> Result<ValidatedAppraisal, FieldErrors> {
        let mut errors = FieldErrors::new("appraisal form");

        let owner = required_text(&mut errors, "owner", &self.owner);
        let location = required_text(&mut errors, "location", &self.location);
        let replacement_value =
            non_negative(&mut errors, "replacement_value", &self.replacement_value);
        let residual_value = non_negative(&mut errors, "residual_value", &self.residual_value);
        let land_area = non_negative(&mut errors, "land_area", &self.land_area);
        let land_unit_value = non_negative(&mut errors, "land_unit_value", &self.land_unit_value);

        let property_age = parse_field(&mut errors, "property_age", &self.property_age);
        let property_age = match property_age {
            Some(age) if (0.0..(MAX_AGE + 1) as f64).contains(&age) => age.floor() as i64,
            Some(_) => {
                errors.insert("property_age", format!("must be between 0 and {MAX_AGE}"));
                0
            }
            None => 0,
        };

        let condition_rating = parse_field(&mut errors, "condition_rating", &self.condition_rating);
        let condition_rating = match condition_rating {
            Some(rating) if rating.fract() == 0.0 && (1.0..=9.0).contains(&rating) => {
                rating as i64
            }
            Some(_) => {
                errors.insert("condition_rating", "must be a whole number between 1 and 9");
                0
            }
            None => 0,
        };

        let exchange_rate = match &self.exchange_rate {
            None => None,
            Some(value) => match parse_field(&mut errors, "exchange_rate", value) {
                Some(rate) if rate > 0.0 => Some(rate),
                Some(_) => {
                    errors.insert("exchange_rate", "must be greater than 0");
                    None
                }
                None => None,
            },
        };

        errors.into_result(ValidatedAppraisal {
            owner,
            location,
            exchange_rate,
            base: AppraisalInput {
                property_age,
                condition_rating,
                replacement_value,
                residual_value,
                land_area,
                land_unit_value,
                exchange_rate: 0.0,
            },
        })
    }
}

fn required_text(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, "is required");
    }
    trimmed.to_string()
}

fn parse_field(errors: &mut FieldErrors, field: &'static str, value: &FieldValue) -> Option<f64> {
    match value.parse() {
        Ok(parsed) if parsed.is_finite() => Some(parsed),
        Ok(_) => {
            errors.insert(field, "must be a finite number");
            None
        }
        Err(message) => {
            errors.insert(field, message);
            None
        }
    }
}

fn non_negative(errors: &mut FieldErrors, field: &'static str, value: &FieldValue) -> f64 {
    match parse_field(errors, field, value) {
        Some(parsed) if parsed < 0.0 => {
            errors.insert(field, "cannot be negative");
            0.0
        }
        Some(parsed) => parsed,
        None => 0.0,
    }
}
