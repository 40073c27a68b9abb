use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

use admission_ai::workflows::deliberation::concours::{
    concours_router, ConcoursDeliberationService,
};
use admission_ai::workflows::deliberation::selection::{
    selection_router, DossierSelectionService,
};
use admission_ai::workflows::deliberation::AuditSink;

use crate::infra::AppState;

/// Full application router: both deliberation pipelines plus the
/// operational endpoints.
pub(crate) fn with_deliberation_routes<S>(
    concours: Arc<ConcoursDeliberationService<S>>,
    selection: Arc<DossierSelectionService<S>>,
) -> axum::Router
where
    S: AuditSink + 'static,
{
    concours_router(concours)
        .merge(selection_router(selection))
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
