use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which pipeline produced a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    Concours,
    Selection,
}

/// Append-only record of one completed deliberation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub pipeline: PipelineKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub total: usize,
    pub retenus: usize,
    pub timestamp: DateTime<Utc>,
}

/// Sink the pipelines emit batch events to. Writers append only; nothing in
/// a batch ever reads the sink back.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
