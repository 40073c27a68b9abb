//! Dossier selection: criteria-driven admissibility without a formal
//! rank-based competition.

pub mod admissibility;
pub mod domain;
pub mod recommendation;
pub mod router;
pub mod service;
pub mod synthesis;

pub use admissibility::CriteriaReport;
pub use domain::{
    DossierAnalysis, DossierCandidate, SelectionCriteria, SelectionRequest, SelectionResponse,
    SingleDossierRequest,
};
pub use router::selection_router;
pub use service::DossierSelectionService;
