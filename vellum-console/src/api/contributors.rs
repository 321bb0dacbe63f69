//! Contributor attribution endpoints

use uuid::Uuid;

use vellum_common::model::{
    AddContributorRequest, ApprovalRequest, Attribution, OverrideRequest,
    UpdateAttributionRequest, User, UserSearchParams, ValidateSplitsResponse,
};
use vellum_common::Result;

use super::client::ApiClient;

const CONTRIBUTORS_PATH: &str = "/contributors";
const USERS_PATH: &str = "/users";

/// Client for the attribution endpoints of the publishing API
#[derive(Debug, Clone)]
pub struct ContributorsClient {
    api: ApiClient,
}

impl ContributorsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all contributors on a work
    pub async fn list_for_work(&self, work_id: Uuid) -> Result<Vec<Attribution>> {
        self.api
            .get(&format!("{}/work/{}", CONTRIBUTORS_PATH, work_id))
            .await
    }

    /// Add a contributor to a work (by user id or invite email)
    pub async fn add(&self, request: &AddContributorRequest) -> Result<Attribution> {
        if request.user_id.is_none() && request.email.is_none() {
            return Err(vellum_common::Error::InvalidInput(
                "either a user id or an email is required".to_string(),
            ));
        }
        self.api.post(CONTRIBUTORS_PATH, request).await
    }

    /// Update a contributor's role or split
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateAttributionRequest,
    ) -> Result<Attribution> {
        self.api
            .patch(&format!("{}/{}", CONTRIBUTORS_PATH, id), request)
            .await
    }

    /// Remove a contributor from a work
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.api
            .delete(&format!("{}/{}", CONTRIBUTORS_PATH, id))
            .await
    }

    /// Submit the calling contributor's approval decision
    pub async fn approve(&self, request: &ApprovalRequest) -> Result<Attribution> {
        self.api
            .post(&format!("{}/approve", CONTRIBUTORS_PATH), request)
            .await
    }

    /// Override a non-responsive contributor (publisher action)
    pub async fn override_approval(&self, request: &OverrideRequest) -> Result<Attribution> {
        self.api
            .post(&format!("{}/override", CONTRIBUTORS_PATH), request)
            .await
    }

    /// Ask the server to validate a work's splits
    ///
    /// The server check is authoritative; the local validator in
    /// `vellum_common::splits` only gates the UI.
    pub async fn validate_splits(&self, work_id: Uuid) -> Result<ValidateSplitsResponse> {
        self.api
            .get(&format!("{}/validate/{}", CONTRIBUTORS_PATH, work_id))
            .await
    }

    /// Search platform users to add as contributors
    pub async fn search_users(&self, params: &UserSearchParams) -> Result<Vec<User>> {
        self.api
            .get_with_query(&format!("{}/search", USERS_PATH), params)
            .await
    }
}
