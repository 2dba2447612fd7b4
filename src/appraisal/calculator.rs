use serde::{Deserialize, Serialize};

use super::table::{CONDITION_COLUMNS, MAX_AGE, ROSS_HEIDECKE};

/// Numeric attributes of one appraisal request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppraisalInput {
    /// Whole years since construction.
    pub property_age: i64,
    /// 1 (excellent) through 9 (worthless).
    pub condition_rating: i64,
    /// Cost of building an equivalent structure new (VR).
    pub replacement_value: f64,
    /// Value of the structure at the end of its useful life (Vr).
    pub residual_value: f64,
    /// Land surface in square meters.
    pub land_area: f64,
    pub land_unit_value: f64,
    /// Local-currency units per foreign unit; zero disables conversion.
    pub exchange_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppraisalResult {
    /// Raw table value on a 0-100 scale.
    pub depreciation_coefficient_percent: f64,
    pub current_structure_value: f64,
    pub land_value: f64,
    pub total_value: f64,
    pub total_value_in_foreign_currency: f64,
}

/// Looks up the depreciation percentage for an age and condition rating.
///
/// Inputs outside the table are clamped onto its edges, so every pair of
/// integers resolves to a cell.
pub fn lookup_coefficient(age_years: i64, condition_rating: i64) -> f64 {
    let row = age_years.clamp(0, MAX_AGE) as usize;
    let column = condition_rating
        .saturating_sub(1)
        .clamp(0, CONDITION_COLUMNS as i64 - 1) as usize;
    ROSS_HEIDECKE[row][column]
}

/// Applies `Va = VR - (VR - Vr) * K` and adds the land value.
///
/// The structure value is not clamped: a residual above the replacement value
/// yields a current value above the replacement value.
pub fn compute_appraisal(input: &AppraisalInput) -> AppraisalResult {
    let land_value = input.land_area * input.land_unit_value;
    let coefficient = lookup_coefficient(input.property_age, input.condition_rating);

    let current_structure_value = input.replacement_value
        - (input.replacement_value - input.residual_value) * (coefficient / 100.0);
    let total_value = current_structure_value + land_value;

    let total_value_in_foreign_currency = if input.exchange_rate > 0.0 {
        total_value / input.exchange_rate
    } else {
        0.0
    };

    AppraisalResult {
        depreciation_coefficient_percent: coefficient,
        current_structure_value,
        land_value,
        total_value,
        total_value_in_foreign_currency,
    }
}
