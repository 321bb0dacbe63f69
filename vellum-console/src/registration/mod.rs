//! Registration core
//!
//! The submission gate and the orchestrator that drives a work through
//! submit-for-registration, on-chain registration, and status polling.
//! Work status transitions themselves are server-authoritative; the
//! transition table lives on `vellum_common::model::WorkStatus`.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{RegistrationOrchestrator, DEFAULT_POLL_INTERVAL};
pub use state::{ensure_submittable, submission_blockers, Blocker};
