//! Foreign-currency quotes used to express appraisals in a second currency.

mod dolar_api;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use dolar_api::{parse_quote, DolarApiClient};

/// Local-currency units per one foreign unit, as observed at `fetched_at`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExchangeQuote {
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExchangeRateError {
    #[error("rate feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rate feed answered with status {0}")]
    Status(u16),
    #[error("rate feed returned an unusable quote: {0}")]
    InvalidQuote(String),
}

/// Anything able to report the current exchange rate on demand.
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    async fn current_rate(&self) -> Result<ExchangeQuote, ExchangeRateError>;
}

/// Source that always reports the same rate. Used offline and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateSource {
    rate: f64,
}

impl FixedRateSource {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl ExchangeRateSource for FixedRateSource {
    async fn current_rate(&self) -> Result<ExchangeQuote, ExchangeRateError> {
        if self.rate > 0.0 {
            Ok(ExchangeQuote {
                rate: self.rate,
                fetched_at: Utc::now(),
            })
        } else {
            Err(ExchangeRateError::InvalidQuote(format!(
                "fixed rate {} is not positive",
                self.rate
            )))
        }
    }
}
