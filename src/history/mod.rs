//! Saved appraisals, most recent first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::appraisal::{AppraisalInput, AppraisalResult, RateOrigin};
use crate::repository::{sequence_number, RepositoryError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppraisalId(pub String);

impl AppraisalId {
    pub fn sequence(&self) -> Option<u64> {
        sequence_number(&self.0)
    }
}

impl fmt::Display for AppraisalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One appraisal together with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalRecord {
    pub id: AppraisalId,
    pub recorded_at: DateTime<Utc>,
    pub owner: String,
    pub location: String,
    pub input: AppraisalInput,
    pub result: AppraisalResult,
    /// Where the exchange rate used for the conversion came from.
    pub rate_origin: RateOrigin,
}

/// Storage abstraction for the appraisal history.
pub trait HistoryRepository: Send + Sync {
    fn insert(&self, record: AppraisalRecord) -> Result<AppraisalRecord, RepositoryError>;
    fn fetch(&self, id: &AppraisalId) -> Result<Option<AppraisalRecord>, RepositoryError>;
    fn remove(&self, id: &AppraisalId) -> Result<(), RepositoryError>;
    /// All records in no particular order.
    fn list(&self) -> Result<Vec<AppraisalRecord>, RepositoryError>;
}

/// Orders records newest first; ties on the timestamp fall back to the id
/// sequence, then to the raw id for ids without one.
pub fn newest_first(records: &mut [AppraisalRecord]) {
    records.sort_by(|left, right| {
        right
            .recorded_at
            .cmp(&left.recorded_at)
            .then_with(|| right.id.sequence().cmp(&left.id.sequence()))
            .then_with(|| right.id.cmp(&left.id))
    });
}
