use crate::infra::AppState;
use appraisal_desk::appraisal::{appraisal_router, AppraisalService};
use appraisal_desk::exchange::ExchangeRateSource;
use appraisal_desk::history::HistoryRepository;
use appraisal_desk::rent_index::RentIndexSource;
use appraisal_desk::rentals::{
    rental_router, PaymentRepository, RentalRepository, RentalService,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<H, S, R, P, I>(
    appraisals: Arc<AppraisalService<H, S>>,
    rentals: Arc<RentalService<R, P, I>>,
) -> axum::Router
where
    H: HistoryRepository + 'static,
    S: ExchangeRateSource + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
    I: RentIndexSource + 'static,
{
    appraisal_router(appraisals)
        .merge(rental_router(rentals))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
