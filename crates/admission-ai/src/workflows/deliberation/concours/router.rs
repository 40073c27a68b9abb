use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use crate::workflows::deliberation::audit::AuditSink;

use super::domain::{ConcoursCandidate, ConcoursRequest, QuickEntryCandidate};
use super::service::ConcoursDeliberationService;

/// Router builder exposing the concours deliberation endpoints.
pub fn concours_router<S>(service: Arc<ConcoursDeliberationService<S>>) -> Router
where
    S: AuditSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/deliberation/concours/deliberation",
            post(deliberation_handler::<S>),
        )
        .route(
            "/api/v1/deliberation/concours/saisie-notes",
            post(quick_entry_handler),
        )
        .with_state(service)
}

pub(crate) async fn deliberation_handler<S>(
    State(service): State<Arc<ConcoursDeliberationService<S>>>,
    axum::Json(request): axum::Json<ConcoursRequest>,
) -> Response
where
    S: AuditSink + 'static,
{
    let response = service.deliberate(&request);
    (StatusCode::OK, axum::Json(response)).into_response()
}

/// Simplified note entry: resolves the per-subject map variant into
/// structured notes and echoes candidates ready for the deliberation
/// endpoint.
pub(crate) async fn quick_entry_handler(
    axum::Json(candidats): axum::Json<Vec<QuickEntryCandidate>>,
) -> Response {
    let formatted: Vec<ConcoursCandidate> = candidats
        .into_iter()
        .map(|candidat| ConcoursCandidate {
            id: candidat.id,
            nom: candidat.nom,
            prenom: candidat.prenom,
            notes: candidat.notes.into_notes(),
            date_naissance: None,
            etablissement_origine: None,
        })
        .collect();

    let payload = json!({
        "status": "success",
        "candidats_enregistres": formatted.len(),
        "candidats": formatted,
        "next_step": "Utilisez POST /api/v1/deliberation/concours/deliberation avec ces données",
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
