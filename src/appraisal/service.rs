use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::calculator::{compute_appraisal, AppraisalInput, AppraisalResult};
use super::form::AppraisalForm;
use crate::exchange::ExchangeRateSource;
use crate::history::{newest_first, AppraisalId, AppraisalRecord, HistoryRepository};
use crate::repository::RepositoryError;
use crate::validation::FieldErrors;

/// Where the exchange rate applied to an appraisal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    Form,
    Feed,
    /// The feed could not be reached; conversion was disabled.
    Unavailable,
}

/// A computed appraisal that has not necessarily been saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appraisal {
    pub owner: String,
    pub location: String,
    pub input: AppraisalInput,
    pub result: AppraisalResult,
    pub rate_origin: RateOrigin,
}

/// Service composing the form boundary, the rate feed and the history store.
pub struct AppraisalService<R, S> {
    history: Arc<R>,
    rates: Arc<S>,
}

static APPRAISAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_appraisal_id() -> AppraisalId {
    let id = APPRAISAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AppraisalId(format!("apr-{id:06}"))
}

impl<R, S> AppraisalService<R, S>
where
    R: HistoryRepository + 'static,
    S: ExchangeRateSource + 'static,
{
    pub fn new(history: Arc<R>, rates: Arc<S>) -> Self {
        Self { history, rates }
    }

    /// Validate a form and compute its appraisal. Forms without an exchange
    /// rate poll the feed; a feed failure disables the currency conversion.
    pub async fn appraise(&self, form: &AppraisalForm) -> Result<Appraisal, AppraisalServiceError> {
        let validated = form.validate()?;

        let (exchange_rate, rate_origin) = match validated.exchange_rate {
            Some(rate) => (rate, RateOrigin::Form),
            None => match self.rates.current_rate().await {
                Ok(quote) => (quote.rate, RateOrigin::Feed),
                Err(err) => {
                    warn!(error = %err, "exchange rate unavailable; skipping currency conversion");
                    (0.0, RateOrigin::Unavailable)
                }
            },
        };

        let input = validated.input_with_rate(exchange_rate);
        let result = compute_appraisal(&input);

        Ok(Appraisal {
            owner: validated.owner,
            location: validated.location,
            input,
            result,
            rate_origin,
        })
    }

    /// Store a computed appraisal in the history.
    pub fn save(&self, appraisal: Appraisal) -> Result<AppraisalRecord, AppraisalServiceError> {
        let record = AppraisalRecord {
            id: next_appraisal_id(),
            recorded_at: Utc::now(),
            owner: appraisal.owner,
            location: appraisal.location,
            input: appraisal.input,
            result: appraisal.result,
            rate_origin: appraisal.rate_origin,
        };

        let stored = self.history.insert(record)?;
        info!(id = %stored.id, total = stored.result.total_value, "appraisal saved");
        Ok(stored)
    }

    pub fn history(&self) -> Result<Vec<AppraisalRecord>, AppraisalServiceError> {
        let mut records = self.history.list()?;
        newest_first(&mut records);
        Ok(records)
    }

    pub fn get(&self, id: &AppraisalId) -> Result<AppraisalRecord, AppraisalServiceError> {
        let record = self.history.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn delete(&self, id: &AppraisalId) -> Result<(), AppraisalServiceError> {
        self.history.remove(id)?;
        info!(%id, "appraisal removed from history");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppraisalServiceError {
    #[error(transparent)]
    Validation(#[from] FieldErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
