use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use admission_ai::workflows::classification::{
    ClassificationError, DocumentClassifier, Prediction,
};
use admission_ai::workflows::deliberation::{AuditError, AuditEvent, AuditSink};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory audit journal. Append-only; `events` exposes a snapshot for
/// the demo command and tests.
#[derive(Default)]
pub(crate) struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AuditError::Unavailable("journal d'audit inaccessible".to_string()))?;
        guard.push(event);
        Ok(())
    }
}

impl MemoryAuditSink {
    pub(crate) fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Deterministic classifier backing the demo command. Real deployments
/// inject a model-backed implementation instead.
#[derive(Default, Clone)]
pub(crate) struct StubDocumentClassifier;

impl DocumentClassifier for StubDocumentClassifier {
    fn classify(&self, content: &[u8]) -> Result<Prediction, ClassificationError> {
        if content.is_empty() {
            return Err(ClassificationError::Inference("document vide".to_string()));
        }

        let (label, confidence, arrete, relever) = if content.len() % 2 == 0 {
            ("arrete", 0.92, 0.92, 0.08)
        } else {
            ("relever", 0.82, 0.18, 0.82)
        };

        let mut probabilities = BTreeMap::new();
        probabilities.insert("arrete".to_string(), arrete);
        probabilities.insert("relever".to_string(), relever);

        Ok(Prediction {
            label: label.to_string(),
            confidence,
            probabilities,
        })
    }
}
