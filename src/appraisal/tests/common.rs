use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::appraisal::{AppraisalForm, AppraisalService, FieldValue};
use crate::exchange::{ExchangeQuote, ExchangeRateError, ExchangeRateSource, FixedRateSource};
use crate::history::{AppraisalId, AppraisalRecord, HistoryRepository};
use crate::repository::RepositoryError;

pub(super) fn form() -> AppraisalForm {
    AppraisalForm {
        owner: "Lucia Fernandez".to_string(),
        location: "Av. Colon 1450".to_string(),
        replacement_value: FieldValue::Number(100_000.0),
        residual_value: FieldValue::Number(10_000.0),
        property_age: FieldValue::Number(0.0),
        condition_rating: FieldValue::Number(1.0),
        land_area: FieldValue::Number(200.0),
        land_unit_value: FieldValue::Number(500.0),
        exchange_rate: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistory {
    pub(super) records: Arc<Mutex<HashMap<AppraisalId, AppraisalRecord>>>,
}

impl HistoryRepository for MemoryHistory {
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

pub(super) struct UnavailableHistory;

impl HistoryRepository for UnavailableHistory {
    fn insert(&self, _record: AppraisalRecord) -> Result<AppraisalRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AppraisalId) -> Result<Option<AppraisalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &AppraisalId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<AppraisalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflineFeed;

#[async_trait]
impl ExchangeRateSource for OfflineFeed {
    async fn current_rate(&self) -> Result<ExchangeQuote, ExchangeRateError> {
        Err(ExchangeRateError::Status(503))
    }
}

pub(super) fn build_service(
    rate: f64,
) -> (AppraisalService<MemoryHistory, FixedRateSource>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let service = AppraisalService::new(history.clone(), Arc::new(FixedRateSource::new(rate)));
    (service, history)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
