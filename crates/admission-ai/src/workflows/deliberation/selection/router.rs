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

use super::domain::{SelectionRequest, SingleDossierRequest};
use super::service::DossierSelectionService;

/// Router builder exposing the dossier selection endpoints.
pub fn selection_router<S>(service: Arc<DossierSelectionService<S>>) -> Router
where
    S: AuditSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/deliberation/selection/analyser",
            post(analyser_handler::<S>),
        )
        .route(
            "/api/v1/deliberation/selection/evaluer-un",
            post(single_dossier_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn analyser_handler<S>(
    State(service): State<Arc<DossierSelectionService<S>>>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    S: AuditSink + 'static,
{
    let response = service.analyze(&request);
    (StatusCode::OK, axum::Json(response)).into_response()
}

/// Single-dossier shortcut: wraps the dossier into a one-element batch and
/// returns that dossier's analysis directly.
pub(crate) async fn single_dossier_handler<S>(
    State(service): State<Arc<DossierSelectionService<S>>>,
    axum::Json(request): axum::Json<SingleDossierRequest>,
) -> Response
where
    S: AuditSink + 'static,
{
    let batch = SelectionRequest {
        dossiers: vec![request.dossier],
        criteres: request.criteres,
        formation_id: None,
        formation_nom: None,
    };
    let response = service.analyze(&batch);

    let analysis = response
        .dossiers_admissibles
        .into_iter()
        .next()
        .or_else(|| response.dossiers_non_admissibles.into_iter().next());

    match analysis {
        Some(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        None => {
            let payload = json!({ "error": "aucun dossier analysé" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::to_bytes;

    use crate::workflows::deliberation::audit::{AuditError, AuditEvent};
    use crate::workflows::deliberation::domain::Note;

    use super::super::domain::{DossierCandidate, SelectionCriteria};
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<AuditEvent>>,
    }

    impl AuditSink for RecordingSink {
        fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
            self.events.lock().expect("audit mutex poisoned").push(event);
            Ok(())
        }
    }

    fn note(matiere: &str, value: f64) -> Note {
        Note {
            matiere: matiere.to_string(),
            note: value,
            coefficient: 1.0,
            annee: None,
            semestre: None,
        }
    }

    fn dossier(id: &str) -> DossierCandidate {
        DossierCandidate {
            id: id.to_string(),
            nom: "Razafy".to_string(),
            prenom: "Marie".to_string(),
            notes: vec![
                note("Mathématiques", 14.0),
                note("Informatique", 16.0),
                note("Physique", 12.0),
            ],
            moyenne_generale: None,
            etablissement: None,
            filiere_origine: None,
            diplome: None,
            annee_obtention: None,
            mention: None,
            experience: None,
            motivation: None,
        }
    }

    #[tokio::test]
    async fn analyser_handler_returns_the_batch_response() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(DossierSelectionService::new(sink.clone()));

        let request = SelectionRequest {
            dossiers: vec![dossier("D001")],
            criteres: SelectionCriteria {
                moyenne_minimum: 12.0,
                criteres_texte: Some(
                    "Bonne maîtrise des mathématiques et de l'informatique".to_string(),
                ),
                ..SelectionCriteria::default()
            },
            formation_id: Some("M1-INFO".to_string()),
            formation_nom: None,
        };

        let response = analyser_handler(State(service), axum::Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let parsed: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(parsed["nombre_admissibles"], 1);
        assert_eq!(parsed["dossiers_admissibles"][0]["score_global"], 76.0);
        assert_eq!(sink.events.lock().expect("audit mutex poisoned").len(), 1);
    }

    #[tokio::test]
    async fn single_dossier_handler_unwraps_the_analysis() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(DossierSelectionService::new(sink));

        let request = SingleDossierRequest {
            dossier: dossier("D002"),
            criteres: SelectionCriteria::default(),
        };

        let response = single_dossier_handler(State(service), axum::Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let parsed: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(parsed["candidat_id"], "D002");
        assert_eq!(parsed["admissible"], true);
    }
}
