//! Deliberation engine for admission campaigns: ranks concours candidates,
//! analyses dossier applications, and exposes the HTTP routers the API
//! service mounts.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
