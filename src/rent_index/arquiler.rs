use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use tracing::debug;

use super::{RentIndexError, RentIndexRequest, RentIndexSource};
use crate::config::RentIndexConfig;

/// Fields the calculator has been seen to carry the updated amount in.
const AMOUNT_FIELDS: [&str; 4] = ["new_amount", "newAmount", "amount", "result"];

/// Client for the ARquiler rent calculator (RapidAPI hosted).
///
/// Requests are `POST`ed as `{amount, date, months, rate}`. The RapidAPI key
/// and host headers are only attached when a key is configured.
#[derive(Clone)]
pub struct ArquilerClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    host: Option<String>,
}

impl ArquilerClient {
    pub fn new(config: &RentIndexConfig) -> Result<Self, RentIndexError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let host = Url::parse(&config.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string));

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            host,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RentIndexSource for ArquilerClient {
    async fn adjusted_rent(&self, request: &RentIndexRequest) -> Result<f64, RentIndexError> {
        let payload = json!({
            "amount": request.amount,
            "date": request.lease_start.format("%Y-%m-%d").to_string(),
            "months": request.lease_months,
            "rate": request.index.as_str(),
        });

        let mut builder = self.client.post(&self.url).json(&payload);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-rapidapi-key", key);
            if let Some(host) = &self.host {
                builder = builder.header("x-rapidapi-host", host);
            }
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(RentIndexError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let amount = parse_adjusted_amount(&body)?;
        debug!(
            previous = request.amount,
            amount,
            index = request.index.as_str(),
            "rent index applied"
        );
        Ok(amount)
    }
}

/// Reads the adjusted amount from a calculator response: either a bare JSON
/// number or an object carrying it under one of the known field names, as a
/// number or numeric string. The amount must be positive.
pub fn parse_adjusted_amount(body: &str) -> Result<f64, RentIndexError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|err| RentIndexError::InvalidResponse(format!("malformed json ({err})")))?;

    let amount = match &payload {
        Value::Number(number) => number.as_f64(),
        Value::Object(fields) => AMOUNT_FIELDS
            .iter()
            .find_map(|name| fields.get(*name))
            .and_then(|value| match value {
                Value::Number(number) => number.as_f64(),
                Value::String(raw) => raw.trim().parse::<f64>().ok(),
                _ => None,
            }),
        _ => None,
    }
    .ok_or_else(|| RentIndexError::InvalidResponse("missing numeric amount".to_string()))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(RentIndexError::InvalidResponse(format!(
            "amount {amount} is not positive"
        )));
    }
    Ok(amount)
}
