use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::adjustment::AdjustmentRequest;
use super::domain::{RentalDetails, RentalId};
use super::payments::{PaymentDetails, PaymentId, PaymentRepository};
use super::repository::RentalRepository;
use super::schedule::LeaseSchedule;
use super::service::{RentalService, RentalServiceError};
use crate::rent_index::RentIndexSource;
use crate::repository::RepositoryError;

/// Router builder exposing the rental registry and payment ledger.
pub fn rental_router<R, P, I>(service: Arc<RentalService<R, P, I>>) -> Router
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/rentals",
            post(create_handler::<R, P, I>).get(list_handler::<R, P, I>),
        )
        .route(
            "/api/v1/rentals/:rental_id",
            get(get_handler::<R, P, I>)
                .put(update_handler::<R, P, I>)
                .delete(delete_handler::<R, P, I>),
        )
        .route(
            "/api/v1/rentals/:rental_id/schedule",
            get(schedule_handler::<R, P, I>),
        )
        .route(
            "/api/v1/rentals/:rental_id/adjustment",
            post(adjustment_handler::<R, P, I>),
        )
        .route(
            "/api/v1/rentals/:rental_id/payments",
            post(record_payment_handler::<R, P, I>)
                .get(month_payments_handler::<R, P, I>),
        )
        .route(
            "/api/v1/payments/:payment_id",
            put(update_payment_handler::<R, P, I>)
                .delete(delete_payment_handler::<R, P, I>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleQuery {
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScheduleView {
    rental_id: RentalId,
    schedule: Option<LeaseSchedule>,
    next_adjustment: Option<NaiveDate>,
    lease_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MonthQuery {
    year: i32,
    month: u32,
}

pub(crate) async fn create_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Json(details): Json<RentalDetails>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.create(details) {
        Ok(property) => (StatusCode::CREATED, Json(property)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.list() {
        Ok(properties) => (StatusCode::OK, Json(properties)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(rental_id): Path<String>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.get(&RentalId(rental_id)) {
        Ok(property) => (StatusCode::OK, Json(property)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(rental_id): Path<String>,
    Json(details): Json<RentalDetails>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.update(&RentalId(rental_id), details) {
        Ok(property) => (StatusCode::OK, Json(property)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(rental_id): Path<String>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.delete(&RentalId(rental_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn schedule_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(rental_id): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    let rental_id = RentalId(rental_id);
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());

    match service.schedule(&rental_id) {
        Ok(schedule) => {
            let next_adjustment = schedule
                .as_ref()
                .and_then(|schedule| schedule.next_adjustment(today));
            let lease_active = schedule
                .as_ref()
                .map(|schedule| schedule.is_active_on(today))
                .unwrap_or(false);
            let view = ScheduleView {
                rental_id,
                schedule,
                next_adjustment,
                lease_active,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn adjustment_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(rental_id): Path<String>,
    Json(request): Json<AdjustmentRequest>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.adjust_rent(&RentalId(rental_id), request).await {
        Ok(adjustment) => (StatusCode::OK, Json(adjustment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn record_payment_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(rental_id): Path<String>,
    Json(details): Json<PaymentDetails>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.record_payment(&RentalId(rental_id), details) {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn month_payments_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(rental_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.payments_for_month(&RentalId(rental_id), query.year, query.month) {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_payment_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(payment_id): Path<String>,
    Json(details): Json<PaymentDetails>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.update_payment(&PaymentId(payment_id), details) {
        Ok(payment) => (StatusCode::OK, Json(payment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_payment_handler<R, P, I>(
    State(service): State<Arc<RentalService<R, P, I>>>,
    Path(payment_id): Path<String>,
) -> Response
where
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    match service.delete_payment(&PaymentId(payment_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: RentalServiceError) -> Response {
    match err {
        RentalServiceError::Validation(errors) => {
            let payload = json!({
                "error": errors.to_string(),
                "fields": errors.fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        invalid @ RentalServiceError::InvalidPeriod { .. } => {
            let payload = json!({ "error": invalid.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        RentalServiceError::RentIndex(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
        RentalServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "record not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
