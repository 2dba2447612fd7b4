use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::adjustment::{AdjustmentRequest, RentAdjustment};
use super::domain::{RentalDetails, RentalId, RentalProperty};
use super::payments::{
    payment_on, payments_in_month, PaymentDetails, PaymentId, PaymentRepository, RentPayment,
};
use super::repository::RentalRepository;
use super::schedule::LeaseSchedule;
use crate::rent_index::{RentIndexError, RentIndexSource};
use crate::repository::RepositoryError;
use crate::validation::FieldErrors;

/// Service over the rental registry, its payment ledger and rent updates.
pub struct RentalService<R, P, I> {
    properties: Arc<R>,
    payments: Arc<P>,
    index: Arc<I>,
}

static RENTAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PAYMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_rental_id() -> RentalId {
    let id = RENTAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RentalId(format!("rent-{id:06}"))
}

fn next_payment_id() -> PaymentId {
    let id = PAYMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PaymentId(format!("pay-{id:06}"))
}

impl<R, P, I> RentalService<R, P, I>
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    pub fn new(properties: Arc<R>, payments: Arc<P>, index: Arc<I>) -> Self {
        Self {
            properties,
            payments,
            index,
        }
    }

    pub fn create(&self, details: RentalDetails) -> Result<RentalProperty, RentalServiceError> {
        details.validate()?;
        let now = Utc::now();
        let property = RentalProperty {
            id: next_rental_id(),
            details,
            created_at: now,
            updated_at: now,
        };

        let stored = self.properties.insert(property)?;
        info!(id = %stored.id, address = %stored.details.address, "rental property registered");
        Ok(stored)
    }

    /// Replace the editable details, keeping the creation timestamp.
    pub fn update(
        &self,
        id: &RentalId,
        details: RentalDetails,
    ) -> Result<RentalProperty, RentalServiceError> {
        details.validate()?;
        let mut property = self.get(id)?;
        property.details = details;
        property.updated_at = Utc::now();

        self.properties.update(property.clone())?;
        Ok(property)
    }

    pub fn get(&self, id: &RentalId) -> Result<RentalProperty, RentalServiceError> {
        let property = self.properties.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(property)
    }

    /// Properties in registration order.
    pub fn list(&self) -> Result<Vec<RentalProperty>, RentalServiceError> {
        let mut properties = self.properties.list()?;
        properties.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.sequence().cmp(&right.id.sequence()))
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(properties)
    }

    /// Remove a property together with its recorded payments.
    pub fn delete(&self, id: &RentalId) -> Result<(), RentalServiceError> {
        self.get(id)?;
        for payment in self.payments.for_property(id)? {
            self.payments.remove(&payment.id)?;
        }
        self.properties.remove(id)?;
        info!(%id, "rental property removed");
        Ok(())
    }

    pub fn schedule(&self, id: &RentalId) -> Result<Option<LeaseSchedule>, RentalServiceError> {
        let property = self.get(id)?;
        Ok(LeaseSchedule::for_details(&property.details))
    }

    /// Compute the index-adjusted rent, storing it when `apply` is set.
    pub async fn adjust_rent(
        &self,
        id: &RentalId,
        request: AdjustmentRequest,
    ) -> Result<RentAdjustment, RentalServiceError> {
        let mut property = self.get(id)?;
        let terms = property.details.index_request(request.index)?;
        let new_amount = self.index.adjusted_rent(&terms).await?;

        let previous_amount = property.details.rent_amount;
        if request.apply {
            property.details.rent_amount = new_amount;
            property.updated_at = Utc::now();
            self.properties.update(property)?;
        }

        info!(
            %id,
            previous_amount,
            new_amount,
            index = request.index.as_str(),
            applied = request.apply,
            "rent adjusted"
        );
        Ok(RentAdjustment {
            rental_id: id.clone(),
            previous_amount,
            new_amount,
            index: request.index,
            applied: request.apply,
        })
    }

    pub fn record_payment(
        &self,
        property_id: &RentalId,
        details: PaymentDetails,
    ) -> Result<RentPayment, RentalServiceError> {
        details.validate()?;
        self.get(property_id)?;

        let now = Utc::now();
        let payment = RentPayment {
            id: next_payment_id(),
            property_id: property_id.clone(),
            details,
            created_at: now,
            updated_at: now,
        };

        let stored = self.payments.insert(payment)?;
        info!(
            id = %stored.id,
            property = %stored.property_id,
            amount = stored.details.amount,
            "rent payment recorded"
        );
        Ok(stored)
    }

    pub fn update_payment(
        &self,
        id: &PaymentId,
        details: PaymentDetails,
    ) -> Result<RentPayment, RentalServiceError> {
        details.validate()?;
        let mut payment = self.payments.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        payment.details = details;
        payment.updated_at = Utc::now();

        self.payments.update(payment.clone())?;
        Ok(payment)
    }

    pub fn delete_payment(&self, id: &PaymentId) -> Result<(), RentalServiceError> {
        self.payments.remove(id)?;
        Ok(())
    }

    pub fn payments_for_month(
        &self,
        property_id: &RentalId,
        year: i32,
        month: u32,
    ) -> Result<Vec<RentPayment>, RentalServiceError> {
        if !(1..=12).contains(&month) {
            return Err(RentalServiceError::InvalidPeriod { year, month });
        }
        self.get(property_id)?;
        let ledger = self.payments.for_property(property_id)?;
        Ok(payments_in_month(&ledger, year, month))
    }

    pub fn payment_on(
        &self,
        property_id: &RentalId,
        date: NaiveDate,
    ) -> Result<Option<RentPayment>, RentalServiceError> {
        self.get(property_id)?;
        let ledger = self.payments.for_property(property_id)?;
        Ok(payment_on(&ledger, date).cloned())
    }
}

/// Error raised by the rental service.
#[derive(Debug, thiserror::Error)]
pub enum RentalServiceError {
    #[error(transparent)]
    Validation(#[from] FieldErrors),
    #[error("invalid period {year}-{month:02}: month must be between 1 and 12")]
    InvalidPeriod { year: i32, month: u32 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    RentIndex(#[from] RentIndexError),
}
