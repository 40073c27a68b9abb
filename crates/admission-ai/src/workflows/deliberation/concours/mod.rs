//! Concours deliberation: ranked admission under a fixed seat count.

pub mod domain;
pub mod elimination;
pub mod explanation;
pub mod ranking;
pub mod router;
pub mod service;

pub use domain::{
    ConcoursCandidate, ConcoursCandidateResult, ConcoursCriteria, ConcoursRequest,
    ConcoursResponse, NotesInput, QuickEntryCandidate,
};
pub use elimination::{check_elimination, EliminationReason};
pub use router::concours_router;
pub use service::ConcoursDeliberationService;
