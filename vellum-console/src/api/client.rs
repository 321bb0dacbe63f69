//! HTTP client for the publishing API
//!
//! Wraps reqwest with the bearer token, request timeout, and response
//! envelope handling shared by every publishing API endpoint. 401 and 404
//! map to dedicated error variants; other non-success statuses surface the
//! envelope message when one is present.

use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use vellum_common::envelope::ApiEnvelope;
use vellum_common::{Error, Result};

/// Default timeout for publishing API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client for the publishing API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`, attaching `access_token` as a bearer
    /// header on every request when present
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
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

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET an enveloped payload
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path = %path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        unwrap_envelope(response).await
    }

    /// GET an enveloped payload with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        debug!(path = %path, "GET (query)");
        let response = self.http.get(self.url(path)).query(query).send().await?;
        unwrap_envelope(response).await
    }

    /// POST a JSON body, returning the enveloped payload
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path = %path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        unwrap_envelope(response).await
    }

    /// POST with no body (e.g. submit-for-registration)
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path = %path, "POST (empty)");
        let response = self.http.post(self.url(path)).send().await?;
        unwrap_envelope(response).await
    }

    /// POST with no body, expecting a data-less envelope
    pub async fn post_empty_unit(&self, path: &str) -> Result<()> {
        debug!(path = %path, "POST (empty, unit)");
        let response = self.http.post(self.url(path)).send().await?;
        let status = response.status();
        if let Some(error) = status_error(status, path) {
            return Err(refine_with_body(error, response).await);
        }
        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        envelope.into_unit_result()
    }

    /// PATCH a JSON body, returning the enveloped payload
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path = %path, "PATCH");
        let response = self.http.patch(self.url(path)).json(body).send().await?;
        unwrap_envelope(response).await
    }

    /// DELETE, expecting a data-less envelope
    pub async fn delete(&self, path: &str) -> Result<()> {
        debug!(path = %path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        let status = response.status();
        if let Some(error) = status_error(status, path) {
            return Err(refine_with_body(error, response).await);
        }
        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        envelope.into_unit_result()
    }
}

/// Map non-success statuses that carry specific meaning
fn status_error(status: StatusCode, path: &str) -> Option<Error> {
    match status {
        StatusCode::UNAUTHORIZED => Some(Error::Unauthorized(
            "access token missing or expired".to_string(),
        )),
        StatusCode::NOT_FOUND => Some(Error::NotFound(path.to_string())),
        s if !s.is_success() => Some(Error::Api(format!(
            "publishing API returned {}",
            s
        ))),
        _ => None,
    }
}

/// Prefer the envelope message from the error body when one parses
async fn refine_with_body(error: Error, response: Response) -> Error {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| envelope.message);
    match (error, message) {
        (error, None) => error,
        (Error::Unauthorized(_), Some(message)) => Error::Unauthorized(message),
        (Error::NotFound(_), Some(message)) => Error::NotFound(message),
        (_, Some(message)) => Error::Api(message),
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let path = response.url().path().to_string();
    if let Some(error) = status_error(status, &path) {
        return Err(refine_with_body(error, response).await);
    }
    let envelope: ApiEnvelope<T> = response.json().await?;
    envelope.into_result()
}
