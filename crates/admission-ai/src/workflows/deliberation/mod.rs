//! Admission deliberation engine.
//!
//! Two pipelines share the same building blocks: the concours path ranks
//! candidates under a seat capacity, the selection path scores dossier
//! applications on a 0-100 scale. Scoring, criteria interpretation, profile
//! analysis, and audit emission live here so both orchestrators stay thin.

pub mod audit;
pub mod concours;
pub mod criteria;
pub mod domain;
pub mod profile;
pub mod scoring;
pub mod selection;

pub use audit::{AuditError, AuditEvent, AuditSink, PipelineKind};
pub use criteria::{CanonicalTag, CriteriaInterpreter, SynonymTable};
pub use domain::{default_moyenne_minimum, Decision, EvaluationError, MentionBand, Note};
pub use profile::ProfileAnalysis;
