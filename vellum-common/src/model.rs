//! Data model and wire types
//!
//! Types mirror the publishing backend and chain service API contracts.
//! All wire structs serialize camelCase; status and role enums serialize
//! snake_case, matching the JSON the services emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Maximum work title length accepted by the backend
pub const MAX_TITLE_LENGTH: usize = 200;
/// Maximum work summary length accepted by the backend
pub const MAX_SUMMARY_LENGTH: usize = 2000;
/// Minimum work summary length accepted by the backend
pub const MIN_SUMMARY_LENGTH: usize = 10;

// ========================================
// Status and Role Enums
// ========================================

/// Registration lifecycle state of a work
///
/// Transitions are server-authoritative; the only client-initiated
/// transition is `Draft → PendingApproval` via submit-for-registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Draft,
    PendingApproval,
    Approved,
    Registered,
    Rejected,
}

impl WorkStatus {
    /// Check whether the status is terminal (no further transitions)
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkStatus::Registered | WorkStatus::Rejected)
    }

    /// Check whether the state machine permits a transition
    pub fn can_transition_to(self, next: WorkStatus) -> bool {
        use WorkStatus::*;
        matches!(
            (self, next),
            (Draft, PendingApproval)
                | (PendingApproval, Approved)
                | (PendingApproval, Rejected)
                | (Approved, Registered)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkStatus::Draft => "draft",
            WorkStatus::PendingApproval => "pending_approval",
            WorkStatus::Approved => "approved",
            WorkStatus::Registered => "registered",
            WorkStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(WorkStatus::Draft),
            "pending_approval" => Ok(WorkStatus::PendingApproval),
            "approved" => Ok(WorkStatus::Approved),
            "registered" => Ok(WorkStatus::Registered),
            "rejected" => Ok(WorkStatus::Rejected),
            other => Err(Error::InvalidInput(format!("unknown work status: {}", other))),
        }
    }
}

/// Role a contributor holds on a work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorRole {
    PrimaryAuthor,
    CoAuthor,
    Illustrator,
    Editor,
    Moderator,
    Publisher,
}

impl ContributorRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ContributorRole::PrimaryAuthor => "primary_author",
            ContributorRole::CoAuthor => "co_author",
            ContributorRole::Illustrator => "illustrator",
            ContributorRole::Editor => "editor",
            ContributorRole::Moderator => "moderator",
            ContributorRole::Publisher => "publisher",
        }
    }
}

impl fmt::Display for ContributorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributorRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "primary_author" => Ok(ContributorRole::PrimaryAuthor),
            "co_author" => Ok(ContributorRole::CoAuthor),
            "illustrator" => Ok(ContributorRole::Illustrator),
            "editor" => Ok(ContributorRole::Editor),
            "moderator" => Ok(ContributorRole::Moderator),
            "publisher" => Ok(ContributorRole::Publisher),
            other => Err(Error::InvalidInput(format!(
                "unknown contributor role: {}",
                other
            ))),
        }
    }
}

/// Per-contributor approval state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Overridden,
}

impl ApprovalStatus {
    /// Approved and overridden contributors both count toward consent
    pub fn counts_as_approved(self) -> bool {
        matches!(self, ApprovalStatus::Approved | ApprovalStatus::Overridden)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Overridden => "overridden",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chain-side transaction confirmation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    /// Check whether polling can stop
    pub fn is_terminal(self) -> bool {
        matches!(self, TransactionStatus::Confirmed | TransactionStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Works and Contributors
// ========================================

/// A creative work with its attributed contributors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub contributors: Vec<WorkContributor>,
    pub status: WorkStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
    /// Present once an on-chain registration transaction exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl Work {
    /// Sum of all contributor splits
    pub fn total_split(&self) -> f64 {
        self.contributors.iter().map(|c| c.split).sum()
    }

    /// Splits in contributor list order, for validation
    pub fn splits(&self) -> Vec<f64> {
        self.contributors.iter().map(|c| c.split).collect()
    }

    /// True when every contributor has approved (or been overridden)
    pub fn all_contributors_approved(&self) -> bool {
        self.contributors
            .iter()
            .all(|c| c.approval_status.counts_as_approved())
    }
}

/// A contributor entry embedded in a work
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkContributor {
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub role: ContributorRole,
    pub split: f64,
    pub approval_status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

/// A standalone attribution record, as returned by the contributor endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    pub id: Uuid,
    pub work_id: Uuid,
    pub user_id: Uuid,
    pub role: ContributorRole,
    pub split: f64,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A platform user (contributor search, auth)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ========================================
// Request / Response Types
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkRequest {
    pub title: String,
    pub summary: String,
}

impl CreateWorkRequest {
    /// Client-side length checks; the server re-validates
    pub fn validate(&self) -> Result<()> {
        let title_len = self.title.trim().len();
        if title_len == 0 || title_len > MAX_TITLE_LENGTH {
            return Err(Error::InvalidInput(format!(
                "title must be 1-{} characters",
                MAX_TITLE_LENGTH
            )));
        }
        let summary_len = self.summary.trim().len();
        if summary_len < MIN_SUMMARY_LENGTH || summary_len > MAX_SUMMARY_LENGTH {
            return Err(Error::InvalidInput(format!(
                "summary must be {}-{} characters",
                MIN_SUMMARY_LENGTH, MAX_SUMMARY_LENGTH
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Query parameters for listing works
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContributorRequest {
    pub work_id: Uuid,
    /// Either a known user id or an invite email must be provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: ContributorRole,
    pub split: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttributionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ContributorRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub work_id: Uuid,
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequest {
    pub work_id: Uuid,
    pub target_user_id: Uuid,
    pub justification: String,
}

/// Server-side split validation result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSplitsResponse {
    pub valid: bool,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchParams {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

// ========================================
// Auth Types
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

// ========================================
// Chain Registration Types
// ========================================

/// Work metadata recorded on-chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkMetadata {
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Flat contributor projection sent to the chain service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainContributor {
    pub user_id: Uuid,
    pub role: ContributorRole,
    pub split_percentage: f64,
}

/// Request body for the chain register endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub work_id: Uuid,
    pub metadata: WorkMetadata,
    pub contributors: Vec<ChainContributor>,
}

impl RegistrationRequest {
    /// Project a work and its contributor list into the chain wire shape
    pub fn for_work(work: &Work) -> Self {
        Self {
            work_id: work.id,
            metadata: WorkMetadata {
                title: work.title.clone(),
                summary: work.summary.clone(),
                created_at: work.created_at,
            },
            contributors: work
                .contributors
                .iter()
                .map(|c| ChainContributor {
                    user_id: c.user_id,
                    role: c.role,
                    split_percentage: c.split,
                })
                .collect(),
        }
    }
}

/// Transaction descriptor returned by the chain register endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

/// Point-in-time transaction status from the chain status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStatus {
    pub transaction_id: String,
    pub status: TransactionStatus,
    pub confirmations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RegistrationStatus {
    /// Initial status as known from a freshly returned receipt
    pub fn from_receipt(receipt: &RegistrationReceipt) -> Self {
        Self {
            transaction_id: receipt.transaction_id.clone(),
            status: receipt.status,
            confirmations: 0,
            block_number: receipt.block_number,
            error_message: None,
        }
    }
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_work(status: WorkStatus, splits: &[f64]) -> Work {
        Work {
            id: Uuid::new_v4(),
            title: "The Long Portage".to_string(),
            summary: "A river journey told in three voices.".to_string(),
            contributors: splits
                .iter()
                .enumerate()
                .map(|(i, &split)| WorkContributor {
                    user_id: Uuid::new_v4(),
                    user_name: format!("user-{}", i),
                    user_email: format!("user-{}@example.com", i),
                    role: if i == 0 {
                        ContributorRole::PrimaryAuthor
                    } else {
                        ContributorRole::CoAuthor
                    },
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
    fn status_transition_table() {
        use WorkStatus::*;
        assert!(Draft.can_transition_to(PendingApproval));
        assert!(PendingApproval.can_transition_to(Approved));
        assert!(PendingApproval.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Registered));

        assert!(!Draft.can_transition_to(Approved));
        assert!(!Draft.can_transition_to(Registered));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Registered.can_transition_to(Draft));
        assert!(!Rejected.can_transition_to(PendingApproval));
    }

    #[test]
    fn terminal_statuses() {
        assert!(WorkStatus::Registered.is_terminal());
        assert!(WorkStatus::Rejected.is_terminal());
        assert!(!WorkStatus::Draft.is_terminal());
        assert!(!WorkStatus::PendingApproval.is_terminal());
        assert!(!WorkStatus::Approved.is_terminal());

        assert!(TransactionStatus::Confirmed.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(!TransactionStatus::Pending.is_terminal());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&WorkStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"pending_approval\"");
        let parsed: WorkStatus = serde_json::from_str("\"registered\"").unwrap();
        assert_eq!(parsed, WorkStatus::Registered);
    }

    #[test]
    fn role_round_trips_from_str() {
        for role in [
            ContributorRole::PrimaryAuthor,
            ContributorRole::CoAuthor,
            ContributorRole::Illustrator,
            ContributorRole::Editor,
            ContributorRole::Moderator,
            ContributorRole::Publisher,
        ] {
            assert_eq!(role.as_str().parse::<ContributorRole>().unwrap(), role);
        }
        assert!("composer".parse::<ContributorRole>().is_err());
    }

    #[test]
    fn work_serializes_camel_case() {
        let work = sample_work(WorkStatus::Draft, &[60.0, 40.0]);
        let value = serde_json::to_value(&work).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
        let contributor = &value["contributors"][0];
        assert!(contributor.get("userId").is_some());
        assert!(contributor.get("approvalStatus").is_some());
    }

    #[test]
    fn registration_request_projects_contributors_flat() {
        let work = sample_work(WorkStatus::Draft, &[70.0, 30.0]);
        let request = RegistrationRequest::for_work(&work);

        assert_eq!(request.work_id, work.id);
        assert_eq!(request.metadata.title, work.title);
        assert_eq!(request.contributors.len(), 2);
        assert_eq!(request.contributors[0].split_percentage, 70.0);
        assert_eq!(request.contributors[0].user_id, work.contributors[0].user_id);

        let value = serde_json::to_value(&request).unwrap();
        let first = &value["contributors"][0];
        assert!(first.get("userId").is_some());
        assert!(first.get("splitPercentage").is_some());
        assert_eq!(first.get("userName"), None);
    }

    #[test]
    fn all_contributors_approved_counts_overrides() {
        let mut work = sample_work(WorkStatus::PendingApproval, &[50.0, 50.0]);
        assert!(!work.all_contributors_approved());

        work.contributors[0].approval_status = ApprovalStatus::Approved;
        work.contributors[1].approval_status = ApprovalStatus::Overridden;
        assert!(work.all_contributors_approved());

        work.contributors[1].approval_status = ApprovalStatus::Rejected;
        assert!(!work.all_contributors_approved());
    }

    #[test]
    fn create_work_request_length_limits() {
        let ok = CreateWorkRequest {
            title: "A Title".to_string(),
            summary: "A summary long enough to pass.".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short_summary = CreateWorkRequest {
            title: "A Title".to_string(),
            summary: "short".to_string(),
        };
        assert!(short_summary.validate().is_err());

        let long_title = CreateWorkRequest {
            title: "t".repeat(MAX_TITLE_LENGTH + 1),
            summary: "A summary long enough to pass.".to_string(),
        };
        assert!(long_title.validate().is_err());
    }
}
