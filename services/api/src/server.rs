use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use admission_ai::config::AppConfig;
use admission_ai::error::AppError;
use admission_ai::telemetry;
use admission_ai::workflows::deliberation::concours::ConcoursDeliberationService;
use admission_ai::workflows::deliberation::selection::DossierSelectionService;

use crate::cli::ServeArgs;
use crate::infra::{AppState, MemoryAuditSink};
use crate::routes::with_deliberation_routes;

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

    let audit = Arc::new(MemoryAuditSink::default());
    let concours = Arc::new(ConcoursDeliberationService::new(audit.clone()));
    let selection = Arc::new(DossierSelectionService::new(audit));

    let app = with_deliberation_routes(concours, selection)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "service de délibération prêt");

    axum::serve(listener, app).await?;
    Ok(())
}
