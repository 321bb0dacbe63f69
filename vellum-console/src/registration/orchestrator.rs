//! Registration orchestrator
//!
//! Drives a gated work through the two remote calls in strict sequence:
//! submit-for-registration on the publishing API, then register on the
//! chain service. If submission fails, no chain call is made; if the chain
//! call fails, the work stays submitted and re-running
//! [`RegistrationOrchestrator::register`] retries the chain step alone
//! (also exposed directly as
//! [`RegistrationOrchestrator::register_submitted`]).
//!
//! After a successful registration, [`RegistrationOrchestrator::watch`]
//! polls the status endpoint at a fixed interval until the transaction
//! leaves `pending`. Polls are issued sequentially, so a slow in-flight
//! request delays the next tick instead of overlapping it. Cancelling the
//! token stops the loop promptly (view teardown, Ctrl-C).

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use vellum_common::model::{RegistrationReceipt, RegistrationStatus, Work, WorkStatus};
use vellum_common::Result;

use crate::api::{ChainApi, WorkApi};
use crate::registration::state::ensure_submittable;

/// Reference polling interval for pending transactions
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Coordinates submission, chain registration, and status polling
pub struct RegistrationOrchestrator<W, C> {
    works: W,
    chain: C,
    poll_interval: Duration,
}

impl<W: WorkApi, C: ChainApi> RegistrationOrchestrator<W, C> {
    pub fn new(works: W, chain: C) -> Self {
        Self {
            works,
            chain,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the polling interval (tests use a short one)
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run the full registration sequence for a work
    ///
    /// 1. Re-fetch the work and check the submission gate
    /// 2. Submit for registration; abort on failure with no chain call
    /// 3. Register on-chain and return the transaction receipt
    ///
    /// A work that is already submitted (a prior run got past step 2 and
    /// then the chain call failed or was interrupted) skips straight to
    /// step 3, so re-running `register` retries the chain step alone.
    pub async fn register(&self, work_id: Uuid) -> Result<RegistrationReceipt> {
        let work = self.works.get(work_id).await?;

        if matches!(
            work.status,
            WorkStatus::PendingApproval | WorkStatus::Approved
        ) {
            tracing::info!(
                work_id = %work_id,
                status = %work.status,
                "Work already submitted, retrying chain registration"
            );
            return self.register_submitted(&work).await;
        }

        ensure_submittable(&work)?;

        tracing::info!(work_id = %work_id, "Submitting work for registration");
        let submitted = self.works.submit_for_registration(work_id).await?;

        tracing::info!(
            work_id = %work_id,
            status = %submitted.status,
            "Work submitted, registering on-chain"
        );
        self.register_submitted(&submitted).await
    }

    /// Chain registration step alone, for retry after a chain failure
    ///
    /// The work must already have been submitted; its current contributor
    /// list is projected into the flat chain wire shape.
    pub async fn register_submitted(&self, work: &Work) -> Result<RegistrationReceipt> {
        let request = vellum_common::model::RegistrationRequest::for_work(work);
        let receipt = self.chain.register(&request).await?;

        tracing::info!(
            work_id = %work.id,
            transaction_id = %receipt.transaction_id,
            status = %receipt.status,
            "Chain registration accepted"
        );
        Ok(receipt)
    }

    /// Poll the chain status endpoint until the transaction leaves
    /// `pending`, returning the terminal status
    ///
    /// Returns the last observed status when `cancel` fires before the
    /// transaction settles; callers distinguish the cases with
    /// [`TransactionStatus::is_terminal`](vellum_common::model::TransactionStatus::is_terminal).
    pub async fn watch(
        &self,
        receipt: &RegistrationReceipt,
        cancel: CancellationToken,
    ) -> Result<RegistrationStatus> {
        let mut last = RegistrationStatus::from_receipt(receipt);

        while !last.status.is_terminal() {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(
                        transaction_id = %receipt.transaction_id,
                        "Status watch cancelled"
                    );
                    return Ok(last);
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            last = self.chain.status(&receipt.transaction_id).await?;
            tracing::debug!(
                transaction_id = %last.transaction_id,
                status = %last.status,
                confirmations = last.confirmations,
                "Polled registration status"
            );
        }

        tracing::info!(
            transaction_id = %last.transaction_id,
            status = %last.status,
            block_number = ?last.block_number,
            "Registration reached terminal status"
        );
        Ok(last)
    }
}
