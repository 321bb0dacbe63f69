//! Authentication endpoints
//!
//! Only the login and current-user calls a console session needs. Token
//! refresh is left to the caller: an expired credential surfaces as
//! `Error::Unauthorized` and the user logs in again.

use vellum_common::model::{LoginRequest, LoginResponse, User};
use vellum_common::Result;

use super::client::ApiClient;

const AUTH_PATH: &str = "/auth";

/// Client for the auth endpoints of the publishing API
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for access and refresh tokens
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.api.post(&format!("{}/login", AUTH_PATH), &request).await
    }

    /// Invalidate the current session server-side
    pub async fn logout(&self) -> Result<()> {
        self.api.post_empty_unit(&format!("{}/logout", AUTH_PATH)).await
    }

    /// Fetch the authenticated user
    pub async fn current_user(&self) -> Result<User> {
        self.api.get(&format!("{}/me", AUTH_PATH)).await
    }
}
