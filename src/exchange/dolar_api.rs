use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{ExchangeQuote, ExchangeRateError, ExchangeRateSource};
use crate::config::ExchangeRateConfig;

/// Client for dolarapi.com style quote endpoints.
///
/// The endpoint answers with a JSON object whose `venta` field carries the
/// selling rate and whose optional `fechaActualizacion` carries the quote time.
#[derive(Clone)]
pub struct DolarApiClient {
    client: Client,
    url: String,
}

impl DolarApiClient {
    pub fn new(config: &ExchangeRateConfig) -> Result<Self, ExchangeRateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ExchangeRateSource for DolarApiClient {
    async fn current_rate(&self) -> Result<ExchangeQuote, ExchangeRateError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ExchangeRateError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let quote = parse_quote(&body)?;
        debug!(rate = quote.rate, url = %self.url, "fetched exchange rate");
        Ok(quote)
    }
}

/// Reads a quote body. `venta` may be a JSON number or a numeric string and
/// must be positive; a missing or unparseable timestamp falls back to now.
pub fn parse_quote(body: &str) -> Result<ExchangeQuote, ExchangeRateError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|err| ExchangeRateError::InvalidQuote(format!("malformed json ({err})")))?;

    let rate = match payload.get("venta") {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ExchangeRateError::InvalidQuote("missing numeric 'venta' field".to_string()))?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(ExchangeRateError::InvalidQuote(format!(
            "rate {rate} is not positive"
        )));
    }

    let fetched_at = payload
        .get("fechaActualizacion")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|stamp| stamp.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok(ExchangeQuote { rate, fetched_at })
}
