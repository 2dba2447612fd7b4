use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::calculator::lookup_coefficient;
use super::condition::ConditionRating;
use super::form::AppraisalForm;
use super::service::{Appraisal, AppraisalService, AppraisalServiceError};
use super::table::ROSS_HEIDECKE;
use crate::exchange::ExchangeRateSource;
use crate::history::{AppraisalId, AppraisalRecord, HistoryRepository};
use crate::repository::RepositoryError;

/// Router builder exposing the calculator, the coefficient table and the history.
pub fn appraisal_router<R, S>(service: Arc<AppraisalService<R, S>>) -> Router
where
    R: HistoryRepository + 'static,
    S: ExchangeRateSource + 'static,
{
    Router::new()
        .route("/api/v1/appraisal/coefficient", get(coefficient_handler))
        .route("/api/v1/appraisal/table", get(table_handler))
        .route(
            "/api/v1/appraisals",
            post(appraise_handler::<R, S>).get(history_handler::<R, S>),
        )
        .route(
            "/api/v1/appraisals/:appraisal_id",
            get(record_handler::<R, S>).delete(delete_handler::<R, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoefficientQuery {
    age: i64,
    condition: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CoefficientView {
    age: i64,
    condition: i64,
    coefficient: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ConditionView {
    rating: u8,
    label: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TableRowView {
    age: usize,
    coefficients: [f64; 9],
}

#[derive(Debug, Serialize)]
pub(crate) struct TableView {
    conditions: Vec<ConditionView>,
    rows: Vec<TableRowView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppraisalRequest {
    form: AppraisalForm,
    #[serde(default)]
    save: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AppraisalView {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<AppraisalId>,
    #[serde(flatten)]
    appraisal: Appraisal,
}

pub(crate) async fn coefficient_handler(Query(query): Query<CoefficientQuery>) -> Json<CoefficientView> {
    Json(CoefficientView {
        age: query.age,
        condition: query.condition,
        coefficient: lookup_coefficient(query.age, query.condition),
    })
}

pub(crate) async fn table_handler() -> Json<TableView> {
    let conditions = ConditionRating::ordered()
        .into_iter()
        .map(|condition| ConditionView {
            rating: condition.rating(),
            label: condition.label(),
        })
        .collect();
    let rows = ROSS_HEIDECKE
        .iter()
        .enumerate()
        .map(|(age, coefficients)| TableRowView {
            age,
            coefficients: *coefficients,
        })
        .collect();

    Json(TableView { conditions, rows })
}

pub(crate) async fn appraise_handler<R, S>(
    State(service): State<Arc<AppraisalService<R, S>>>,
    Json(request): Json<AppraisalRequest>,
) -> Response
where
    R: HistoryRepository + 'static,
    S: ExchangeRateSource + 'static,
{
    let appraisal = match service.appraise(&request.form).await {
        Ok(appraisal) => appraisal,
        Err(err) => return error_response(err),
    };

    if !request.save {
        let view = AppraisalView {
            id: None,
            appraisal,
        };
        return (StatusCode::OK, Json(view)).into_response();
    }

    match service.save(appraisal) {
        Ok(record) => {
            let view = AppraisalView {
                id: Some(record.id.clone()),
                appraisal: record_to_appraisal(record),
            };
            (StatusCode::CREATED, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<R, S>(
    State(service): State<Arc<AppraisalService<R, S>>>,
) -> Response
where
    R: HistoryRepository + 'static,
    S: ExchangeRateSource + 'static,
{
    match service.history() {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn record_handler<R, S>(
    State(service): State<Arc<AppraisalService<R, S>>>,
    Path(appraisal_id): Path<String>,
) -> Response
where
    R: HistoryRepository + 'static,
    S: ExchangeRateSource + 'static,
{
    match service.get(&AppraisalId(appraisal_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R, S>(
    State(service): State<Arc<AppraisalService<R, S>>>,
    Path(appraisal_id): Path<String>,
) -> Response
where
    R: HistoryRepository + 'static,
    S: ExchangeRateSource + 'static,
{
    match service.delete(&AppraisalId(appraisal_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn record_to_appraisal(record: AppraisalRecord) -> Appraisal {
    Appraisal {
        owner: record.owner,
        location: record.location,
        input: record.input,
        result: record.result,
        rate_origin: record.rate_origin,
    }
}

fn error_response(err: AppraisalServiceError) -> Response {
    match err {
        AppraisalServiceError::Validation(errors) => {
            let payload = json!({
                "error": errors.to_string(),
                "fields": errors.fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        AppraisalServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "appraisal not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
