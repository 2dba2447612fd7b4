//! Ross-Heidecke appraisal: coefficient table, calculator, form boundary and
//! the HTTP surface over them.

pub mod calculator;
pub mod condition;
pub mod form;
pub mod router;
pub mod service;
pub mod table;

#[cfg(test)]
mod tests;

pub use calculator::{compute_appraisal, lookup_coefficient, AppraisalInput, AppraisalResult};
pub use condition::ConditionRating;
pub use form::{AppraisalForm, FieldValue, ValidatedAppraisal};
pub use router::appraisal_router;
pub use service::{Appraisal, AppraisalService, AppraisalServiceError, RateOrigin};
pub use table::ROSS_HEIDECKE;
