//! Works endpoints

use async_trait::async_trait;
use uuid::Uuid;

use vellum_common::model::{
    CreateWorkRequest, PaginatedResponse, UpdateWorkRequest, Work, WorkListParams,
};
use vellum_common::Result;

use super::client::ApiClient;
use super::WorkApi;

const WORKS_PATH: &str = "/works";

/// Client for the work endpoints of the publishing API
#[derive(Debug, Clone)]
pub struct WorksClient {
    api: ApiClient,
}

impl WorksClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List works with optional status/search filters and pagination
    pub async fn list(&self, params: &WorkListParams) -> Result<PaginatedResponse<Work>> {
        self.api.get_with_query(WORKS_PATH, params).await
    }

    /// Fetch a single work by id
    pub async fn get(&self, id: Uuid) -> Result<Work> {
        self.api.get(&format!("{}/{}", WORKS_PATH, id)).await
    }

    /// Create a new draft work
    pub async fn create(&self, request: &CreateWorkRequest) -> Result<Work> {
        request.validate()?;
        self.api.post(WORKS_PATH, request).await
    }

    /// Update title/summary of an existing work
    pub async fn update(&self, id: Uuid, request: &UpdateWorkRequest) -> Result<Work> {
        self.api
            .patch(&format!("{}/{}", WORKS_PATH, id), request)
            .await
    }

    /// Delete a work (server cascades contributor rows)
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.api.delete(&format!("{}/{}", WORKS_PATH, id)).await
    }

    /// Submit a draft for registration (draft → pending_approval)
    pub async fn submit_for_registration(&self, id: Uuid) -> Result<Work> {
        self.api
            .post_empty(&format!("{}/{}/submit", WORKS_PATH, id))
            .await
    }
}

#[async_trait]
impl WorkApi for WorksClient {
    async fn get(&self, id: Uuid) -> Result<Work> {
        WorksClient::get(self, id).await
    }

    async fn submit_for_registration(&self, id: Uuid) -> Result<Work> {
        WorksClient::submit_for_registration(self, id).await
    }
}
