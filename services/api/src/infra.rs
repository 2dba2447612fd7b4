use appraisal_desk::history::{AppraisalId, AppraisalRecord, HistoryRepository};
use appraisal_desk::rentals::{
    PaymentId, PaymentRepository, RentPayment, RentalId, RentalProperty, RentalRepository,
};
use appraisal_desk::repository::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryHistoryRepository {
    records: Arc<Mutex<HashMap<AppraisalId, AppraisalRecord>>>,
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn insert(&self, record: AppraisalRecord) -> Result<AppraisalRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AppraisalId) -> Result<Option<AppraisalRecord>, RepositoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &AppraisalId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<AppraisalRecord>, RepositoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRentalRepository {
    records: Arc<Mutex<HashMap<RentalId, RentalProperty>>>,
}

impl RentalRepository for InMemoryRentalRepository {
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
        if guard.contains_key(&property.id) {
            guard.insert(property.id.clone(), property);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
pub(crate) struct InMemoryPaymentRepository {
    records: Arc<Mutex<HashMap<PaymentId, RentPayment>>>,
}

impl PaymentRepository for InMemoryPaymentRepository {
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
        if guard.contains_key(&payment.id) {
            guard.insert(payment.id.clone(), payment);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
