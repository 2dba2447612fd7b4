use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryHistoryRepository, InMemoryPaymentRepository, InMemoryRentalRepository,
};
use crate::routes::with_service_routes;
use appraisal_desk::appraisal::AppraisalService;
use appraisal_desk::config::AppConfig;
use appraisal_desk::error::AppError;
use appraisal_desk::exchange::DolarApiClient;
use appraisal_desk::rent_index::ArquilerClient;
use appraisal_desk::rentals::RentalService;
use appraisal_desk::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let rate_feed = Arc::new(DolarApiClient::new(&config.exchange)?);
    let appraisal_service = Arc::new(AppraisalService::new(
        Arc::new(InMemoryHistoryRepository::default()),
        rate_feed,
    ));
    let rent_index = Arc::new(ArquilerClient::new(&config.rent_index)?);
    let rental_service = Arc::new(RentalService::new(
        Arc::new(InMemoryRentalRepository::default()),
        Arc::new(InMemoryPaymentRepository::default()),
        rent_index,
    ));

    let app = with_service_routes(appraisal_service, rental_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rate_feed = %config.exchange.url,
        rent_index = %config.rent_index.url,
        rent_index_keyed = config.rent_index.api_key.is_some(),
        "appraisal desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
