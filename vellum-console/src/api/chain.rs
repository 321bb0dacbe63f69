//! Chain registration service client
//!
//! The chain service is a thin registration proxy with its own base URL.
//! Unlike the publishing API it returns bare JSON bodies; error responses
//! carry a `{message}` object.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use vellum_common::model::{RegistrationReceipt, RegistrationRequest, RegistrationStatus};
use vellum_common::{Error, Result};

use super::ChainApi;

/// Default timeout for chain service requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ChainErrorBody {
    message: Option<String>,
}

/// Client for the chain registration service
#[derive(Debug, Clone)]
pub struct ChainClient {
    http: Client,
    base_url: String,
}

impl ChainClient {
    /// Create a client for the chain service at `base_url`
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = access_token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::InvalidInput(format!("invalid access token: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Register a work on-chain, returning the transaction descriptor
    pub async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationReceipt> {
        debug!(work_id = %request.work_id, "Submitting chain registration");
        let response = self
            .http
            .post(format!("{}/chain/register", self.base_url))
            .json(request)
            .send()
            .await?;
        let response = check_chain_status(response, "Failed to register on chain").await?;
        Ok(response.json().await?)
    }

    /// Fetch the current status of a registration transaction
    pub async fn status(&self, transaction_id: &str) -> Result<RegistrationStatus> {
        let response = self
            .http
            .get(format!("{}/chain/status/{}", self.base_url, transaction_id))
            .send()
            .await?;
        let response =
            check_chain_status(response, "Failed to fetch registration status").await?;
        Ok(response.json().await?)
    }

    /// Fetch the on-chain record for a work, None when no record exists
    pub async fn record(&self, work_id: Uuid) -> Result<Option<RegistrationReceipt>> {
        let response = self
            .http
            .get(format!("{}/chain/record/{}", self.base_url, work_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_chain_status(response, "Failed to fetch on-chain record").await?;
        Ok(Some(response.json().await?))
    }
}

/// Map a non-success chain response to an error, using the body message
/// when the service provided one
async fn check_chain_status(response: Response, fallback: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized(
            "chain service rejected the access token".to_string(),
        ));
    }
    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound("chain resource not found".to_string()));
    }
    let message = response
        .json::<ChainErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("{} ({})", fallback, status));
    Err(Error::Chain(message))
}

#[async_trait]
impl ChainApi for ChainClient {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationReceipt> {
        ChainClient::register(self, request).await
    }

    async fn status(&self, transaction_id: &str) -> Result<RegistrationStatus> {
        ChainClient::status(self, transaction_id).await
    }
}
