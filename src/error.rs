use crate::appraisal::AppraisalServiceError;
use crate::config::ConfigError;
use crate::exchange::ExchangeRateError;
use crate::rent_index::RentIndexError;
use crate::repository::RepositoryError;
use crate::telemetry::TelemetryError;
use crate::validation::FieldErrors;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Exchange(ExchangeRateError),
    RentIndex(RentIndexError),
    Validation(FieldErrors),
    Repository(RepositoryError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Exchange(err) => write!(f, "exchange rate error: {}", err),
            AppError::RentIndex(err) => write!(f, "rent index error: {}", err),
            AppError::Validation(err) => write!(f, "{}", err),
            AppError::Repository(err) => write!(f, "storage error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Exchange(err) => Some(err),
            AppError::RentIndex(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::Repository(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Exchange(_) | AppError::RentIndex(_) => StatusCode::BAD_GATEWAY,
            AppError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::Validation(errors) => {
                Json(json!({ "error": self.to_string(), "fields": errors.fields }))
            }
            _ => Json(json!({ "error": self.to_string() })),
        };
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ExchangeRateError> for AppError {
    fn from(value: ExchangeRateError) -> Self {
        Self::Exchange(value)
    }
}

impl From<RentIndexError> for AppError {
    fn from(value: RentIndexError) -> Self {
        Self::RentIndex(value)
    }
}

impl From<FieldErrors> for AppError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<AppraisalServiceError> for AppError {
    fn from(value: AppraisalServiceError) -> Self {
        match value {
            AppraisalServiceError::Validation(errors) => Self::Validation(errors),
            AppraisalServiceError::Repository(err) => Self::Repository(err),
        }
    }
}
