//! Index-linked rent updates.
//!
//! Argentine leases are adjusted by an official index between the lease start
//! and the adjustment date. The calculation itself is delegated to an external
//! calculator behind [`RentIndexSource`].

mod arquiler;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use arquiler::{parse_adjusted_amount, ArquilerClient};

/// Index the rent is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentIndex {
    /// Consumer price index.
    #[default]
    Ipc,
    /// Central bank lease index.
    Icl,
}

impl RentIndex {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ipc => "ipc",
            Self::Icl => "icl",
        }
    }
}

/// Lease terms sent to the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentIndexRequest {
    pub amount: f64,
    pub lease_start: NaiveDate,
    pub lease_months: u32,
    pub index: RentIndex,
}

#[derive(Debug, thiserror::Error)]
pub enum RentIndexError {
    #[error("rent index request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rent index service answered with status {0}")]
    Status(u16),
    #[error("rent index service returned an unusable amount: {0}")]
    InvalidResponse(String),
}

/// Anything able to compute an index-adjusted rent.
#[async_trait]
pub trait RentIndexSource: Send + Sync {
    async fn adjusted_rent(&self, request: &RentIndexRequest) -> Result<f64, RentIndexError>;
}

/// Applies a constant factor regardless of the index. Used offline and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedIndexSource {
    factor: f64,
}

impl FixedIndexSource {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

#[async_trait]
impl RentIndexSource for FixedIndexSource {
    async fn adjusted_rent(&self, request: &RentIndexRequest) -> Result<f64, RentIndexError> {
        if self.factor > 0.0 {
            Ok(request.amount * self.factor)
        } else {
            Err(RentIndexError::InvalidResponse(format!(
                "fixed factor {} is not positive",
                self.factor
            )))
        }
    }
}
