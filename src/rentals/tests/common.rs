use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::rentals::{
    PaymentDetails, PaymentId, PaymentRepository, RentPayment, RentalDetails, RentalId,
    RentalProperty, RentalRepository, RentalService, RentalStatus,
};
use crate::rent_index::{FixedIndexSource, RentIndexError, RentIndexRequest, RentIndexSource};
use crate::repository::RepositoryError;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn let_details() -> RentalDetails {
    RentalDetails {
        owner: "Marta Quiroga".to_string(),
        owner_contact: "+54 (351) 555-0101".to_string(),
        tenant: "Diego Paz".to_string(),
        tenant_contact: "diego.paz@example.com".to_string(),
        lease_start: Some(date(2025, 3, 1)),
        lease_months: 24,
        rent_amount: 350_000.0,
        adjustment_interval_months: 6,
        address: "Bv. San Juan 820, 4B".to_string(),
        description: "Two bedrooms, balcony".to_string(),
        status: RentalStatus::Active,
    }
}

pub(super) fn vacant_details() -> RentalDetails {
    RentalDetails {
        tenant: String::new(),
        tenant_contact: String::new(),
        lease_start: None,
        lease_months: 0,
        adjustment_interval_months: 0,
        ..let_details()
    }
}

pub(super) fn payment(date: NaiveDate, amount: f64) -> PaymentDetails {
    PaymentDetails {
        date,
        amount,
        observations: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRentals {
    pub(super) records: Arc<Mutex<HashMap<RentalId, RentalProperty>>>,
}

impl RentalRepository for MemoryRentals {
    fn insert(&self, property: RentalProperty) -> Result<RentalProperty, RepositoryError> {
        let mut guard = self.records.lock().expect("rental mutex poisoned");
        if guard.contains_key(&property.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(property.id.clone(), property.clone());
        Ok(property)
    }

    fn update(&self, property: RentalProperty) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("rental mutex poisoned");
        guard.insert(property.id.clone(), property);
        Ok(())
    }

    fn fetch(&self, id: &RentalId) -> Result<Option<RentalProperty>, RepositoryError> {
        let guard = self.records.lock().expect("rental mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &RentalId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("rental mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<RentalProperty>, RepositoryError> {
        let guard = self.records.lock().expect("rental mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryPayments {
    pub(super) records: Arc<Mutex<HashMap<PaymentId, RentPayment>>>,
}

impl PaymentRepository for MemoryPayments {
    fn insert(&self, payment: RentPayment) -> Result<RentPayment, RepositoryError> {
        let mut guard = self.records.lock().expect("payment mutex poisoned");
        if guard.contains_key(&payment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    fn update(&self, payment: RentPayment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("payment mutex poisoned");
        guard.insert(payment.id.clone(), payment);
        Ok(())
    }

    fn fetch(&self, id: &PaymentId) -> Result<Option<RentPayment>, RepositoryError> {
        let guard = self.records.lock().expect("payment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &PaymentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("payment mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn for_property(&self, property_id: &RentalId) -> Result<Vec<RentPayment>, RepositoryError> {
        let guard = self.records.lock().expect("payment mutex poisoned");
        Ok(guard
            .values()
            .filter(|payment| &payment.property_id == property_id)
            .cloned()
            .collect())
    }
}

/// Index calculator that is always down.
pub(super) struct OfflineIndex;

#[async_trait]
impl RentIndexSource for OfflineIndex {
    async fn adjusted_rent(&self, _request: &RentIndexRequest) -> Result<f64, RentIndexError> {
        Err(RentIndexError::Status(503))
    }
}

pub(super) fn build_service() -> (
    RentalService<MemoryRentals, MemoryPayments, FixedIndexSource>,
    Arc<MemoryRentals>,
    Arc<MemoryPayments>,
) {
    build_service_with(FixedIndexSource::new(1.4))
}

pub(super) fn build_service_with<I: RentIndexSource + 'static>(
    index: I,
) -> (
    RentalService<MemoryRentals, MemoryPayments, I>,
    Arc<MemoryRentals>,
    Arc<MemoryPayments>,
) {
    let rentals = Arc::new(MemoryRentals::default());
    let payments = Arc::new(MemoryPayments::default());
    let service = RentalService::new(rentals.clone(), payments.clone(), Arc::new(index));
    (service, rentals, payments)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
