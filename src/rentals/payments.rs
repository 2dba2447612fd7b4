//! Rent payments recorded against a rental property.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::RentalId;
use crate::repository::RepositoryError;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub String);

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payment details as submitted by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl PaymentDetails {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new("rent payment");
        if !(self.amount.is_finite() && self.amount > 0.0) {
            errors.insert("amount", "must be greater than 0");
        }
        errors.into_result(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentPayment {
    pub id: PaymentId,
    pub property_id: RentalId,
    #[serde(flatten)]
    pub details: PaymentDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for the payment ledger.
pub trait PaymentRepository: Send + Sync {
    fn insert(&self, payment: RentPayment) -> Result<RentPayment, RepositoryError>;
    fn update(&self, payment: RentPayment) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PaymentId) -> Result<Option<RentPayment>, RepositoryError>;
    fn remove(&self, id: &PaymentId) -> Result<(), RepositoryError>;
    fn for_property(&self, property_id: &RentalId) -> Result<Vec<RentPayment>, RepositoryError>;
}

/// Payments dated within the given calendar month (1-12), oldest first.
pub fn payments_in_month(payments: &[RentPayment], year: i32, month: u32) -> Vec<RentPayment> {
    let mut matching: Vec<RentPayment> = payments
        .iter()
        .filter(|payment| payment.details.date.year() == year && payment.details.date.month() == month)
        .cloned()
        .collect();
    matching.sort_by(|left, right| {
        left.details
            .date
            .cmp(&right.details.date)
            .then_with(|| left.id.cmp(&right.id))
    });
    matching
}

pub fn payment_on(payments: &[RentPayment], date: NaiveDate) -> Option<&RentPayment> {
    payments.iter().find(|payment| payment.details.date == date)
}

pub fn has_payment_on(payments: &[RentPayment], date: NaiveDate) -> bool {
    payment_on(payments, date).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(id: &str, date: NaiveDate, amount: f64) -> RentPayment {
        let stamp = Utc::now();
        RentPayment {
            id: PaymentId(id.to_string()),
            property_id: RentalId("rent-000001".to_string()),
            details: PaymentDetails {
                date,
                amount,
                observations: None,
            },
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn month_filter_uses_calendar_months() {
        let ledger = vec![
            payment("pay-3", date(2025, 10, 20), 10.0),
            payment("pay-1", date(2025, 9, 30), 10.0),
            payment("pay-2", date(2025, 10, 1), 10.0),
            payment("pay-4", date(2024, 10, 5), 10.0),
        ];

        let october = payments_in_month(&ledger, 2025, 10);
        let ids: Vec<_> = october.iter().map(|payment| payment.id.0.as_str()).collect();
        assert_eq!(ids, vec!["pay-2", "pay-3"]);
        assert!(payments_in_month(&ledger, 2025, 11).is_empty());
    }

    #[test]
    fn lookup_by_date() {
        let ledger = vec![payment("pay-1", date(2025, 10, 1), 350_000.0)];

        assert!(has_payment_on(&ledger, date(2025, 10, 1)));
        assert!(!has_payment_on(&ledger, date(2025, 10, 2)));
        assert_eq!(
            payment_on(&ledger, date(2025, 10, 1)).map(|payment| payment.details.amount),
            Some(350_000.0)
        );
    }

    #[test]
    fn amounts_must_be_positive() {
        let details = PaymentDetails {
            date: date(2025, 10, 1),
            amount: 0.0,
            observations: Some("partial".to_string()),
        };
        let errors = details.validate().expect_err("zero amount rejected");
        assert_eq!(errors.get("amount"), Some("must be greater than 0"));
    }
}
