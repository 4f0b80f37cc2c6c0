use crate::cli::ServeArgs;
use crate::infra::{address_book, record_service, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use landlord_aid::config::AppConfig;
use landlord_aid::error::AppError;
use landlord_aid::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let records = record_service(&config);
    let addresses = address_book(&config)?;
    let static_dir = &config.storage.static_dir;
    if !static_dir.join("index.html").is_file() {
        warn!(static_dir = %static_dir.display(), "frontend build not found; page routes will 404");
    }

    let app = with_service_routes(records, addresses.clone(), static_dir)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        record_store = %config.storage.record_store.display(),
        addresses = addresses.len(),
        scoring = ?config.intake.scoring,
        payload_policy = ?config.intake.payload_policy,
        "landlord aid intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
