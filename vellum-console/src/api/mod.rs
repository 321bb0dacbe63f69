//! Remote service clients
//!
//! The publishing API (works, contributors, auth) and the chain
//! registration service are consumed as opaque HTTP collaborators. The
//! orchestrator depends on the [`WorkApi`] and [`ChainApi`] seams rather
//! than the concrete clients, so test and mock backends can swap in
//! without touching the registration core.

pub mod auth;
pub mod chain;
pub mod client;
pub mod contributors;
pub mod works;

pub use auth::AuthClient;
pub use chain::ChainClient;
pub use client::ApiClient;
pub use contributors::ContributorsClient;
pub use works::WorksClient;

use async_trait::async_trait;
use uuid::Uuid;
use vellum_common::model::{RegistrationReceipt, RegistrationRequest, RegistrationStatus, Work};
use vellum_common::Result;

/// Work operations the registration orchestrator depends on
#[async_trait]
pub trait WorkApi: Send + Sync {
    /// Fetch a work with its contributor list
    async fn get(&self, id: Uuid) -> Result<Work>;

    /// Submit a draft work for registration (draft → pending_approval)
    async fn submit_for_registration(&self, id: Uuid) -> Result<Work>;
}

/// Chain service operations the registration orchestrator depends on
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Record a work and its attribution on the ledger
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationReceipt>;

    /// Fetch the current confirmation status of a transaction
    async fn status(&self, transaction_id: &str) -> Result<RegistrationStatus>;
}
