//! vellum-console library - publishing console client
//!
//! Typed clients for the publishing API and chain registration service,
//! plus the client-side registration core: submission gate, registration
//! orchestrator with status polling, and the step-wizard controller.

pub mod api;
pub mod registration;
pub mod wizard;
