//! Rental registry: properties, lease calendar, index-linked rent updates and
//! the rent payment ledger.

pub mod adjustment;
pub mod domain;
pub mod payments;
pub mod repository;
pub mod router;
pub mod schedule;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use adjustment::{AdjustmentRequest, RentAdjustment};
pub use domain::{RentalDetails, RentalId, RentalProperty, RentalStatus};
pub use payments::{
    has_payment_on, payment_on, payments_in_month, PaymentDetails, PaymentId, PaymentRepository,
    RentPayment,
};
pub use repository::RentalRepository;
pub use router::rental_router;
pub use schedule::LeaseSchedule;
pub use service::{RentalService, RentalServiceError};
pub use validation::is_valid_contact;
