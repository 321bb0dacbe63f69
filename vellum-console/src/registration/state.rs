//! Client-side submission gate
//!
//! The only client-initiated transition is draft → pending_approval, fired
//! by submit-for-registration. It is gated locally on: work still in draft,
//! at least one contributor present, and splits summing to exactly 100.
//! This is a UI-level guard; the server re-validates and remains
//! authoritative, and a server rejection surfaces as an error rather than
//! being reconciled silently.

use std::fmt;

use vellum_common::model::{Work, WorkStatus};
use vellum_common::splits::{validate_splits, SplitVerdict};
use vellum_common::{Error, Result};

/// Reason a work cannot be submitted for registration
#[derive(Debug, Clone, PartialEq)]
pub enum Blocker {
    /// The work has left draft; only drafts can be submitted
    NotDraft(WorkStatus),
    /// No contributors attributed yet
    NoContributors,
    /// Splits fail local validation
    InvalidSplits(SplitVerdict),
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocker::NotDraft(status) => {
                write!(f, "work is {} and can no longer be submitted", status)
            }
            Blocker::NoContributors => write!(f, "at least one contributor is required"),
            Blocker::InvalidSplits(verdict) => write!(
                f,
                "royalty splits are invalid: {}",
                verdict
                    .message()
                    .unwrap_or_else(|| "splits must sum to 100%".to_string())
            ),
        }
    }
}

/// Everything preventing submission, in display order
///
/// Empty exactly when the work has at least one contributor, splits sum to
/// 100, and the work is still a draft.
pub fn submission_blockers(work: &Work) -> Vec<Blocker> {
    let mut blockers = Vec::new();

    if work.status != WorkStatus::Draft {
        blockers.push(Blocker::NotDraft(work.status));
    }

    if work.contributors.is_empty() {
        blockers.push(Blocker::NoContributors);
    } else {
        let verdict = validate_splits(&work.splits());
        if !verdict.valid {
            blockers.push(Blocker::InvalidSplits(verdict));
        }
    }

    blockers
}

/// Gate check before submit-for-registration
pub fn ensure_submittable(work: &Work) -> Result<()> {
    let blockers = submission_blockers(work);
    if blockers.is_empty() {
        return Ok(());
    }
    let reasons: Vec<String> = blockers.iter().map(|b| b.to_string()).collect();
    Err(Error::InvalidInput(reasons.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use vellum_common::model::{ApprovalStatus, ContributorRole, WorkContributor};

    fn work_with_splits(status: WorkStatus, splits: &[f64]) -> Work {
        Work {
            id: Uuid::new_v4(),
            title: "Gatehouse".to_string(),
            summary: "A test fixture of reasonable length.".to_string(),
            contributors: splits
                .iter()
                .map(|&split| WorkContributor {
                    user_id: Uuid::new_v4(),
                    user_name: "someone".to_string(),
                    user_email: "someone@example.com".to_string(),
                    role: ContributorRole::CoAuthor,
                    split,
                    approval_status: ApprovalStatus::Pending,
                    approved_at: None,
                })
                .collect(),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            registered_at: None,
            transaction_id: None,
        }
    }

    #[test]
    fn valid_draft_is_submittable() {
        let work = work_with_splits(WorkStatus::Draft, &[60.0, 40.0]);
        assert!(submission_blockers(&work).is_empty());
        assert!(ensure_submittable(&work).is_ok());
    }

    #[test]
    fn empty_contributor_list_blocks() {
        let work = work_with_splits(WorkStatus::Draft, &[]);
        let blockers = submission_blockers(&work);
        assert_eq!(blockers, vec![Blocker::NoContributors]);
        assert!(ensure_submittable(&work).is_err());
    }

    #[test]
    fn invalid_total_blocks() {
        let work = work_with_splits(WorkStatus::Draft, &[50.0, 40.0]);
        let blockers = submission_blockers(&work);
        assert_eq!(blockers.len(), 1);
        assert!(matches!(blockers[0], Blocker::InvalidSplits(_)));
    }

    #[test]
    fn unblocked_exactly_when_contributors_present_and_total_100() {
        // Fix either condition alone and it still blocks; fix both and it passes
        let empty = work_with_splits(WorkStatus::Draft, &[]);
        assert!(!submission_blockers(&empty).is_empty());

        let wrong_total = work_with_splits(WorkStatus::Draft, &[99.0]);
        assert!(!submission_blockers(&wrong_total).is_empty());

        let ok = work_with_splits(WorkStatus::Draft, &[100.0]);
        assert!(submission_blockers(&ok).is_empty());
    }

    #[test]
    fn non_draft_blocks_even_with_valid_splits() {
        let work = work_with_splits(WorkStatus::PendingApproval, &[100.0]);
        let blockers = submission_blockers(&work);
        assert_eq!(blockers, vec![Blocker::NotDraft(WorkStatus::PendingApproval)]);
    }

    #[test]
    fn blocker_messages_are_human_readable() {
        let work = work_with_splits(WorkStatus::Draft, &[30.0, 30.0]);
        let error = ensure_submittable(&work).unwrap_err();
        assert!(error.to_string().contains("40% remaining"));
    }
}
