//! Publishing API response envelope
//!
//! Every publishing API response arrives as `{success, data, message,
//! errors}`. The envelope is unwrapped here; domain code only ever sees the
//! inner payload or an [`Error`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Standard response envelope for the publishing API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

/// Field-level error detail inside a failed envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap into the inner payload, or an [`Error::Api`] on failure
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(Error::Api(self.error_message()));
        }
        self.data
            .ok_or_else(|| Error::Api("response envelope missing data".to_string()))
    }

    /// Unwrap a data-less envelope (DELETE and similar)
    pub fn into_unit_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Api(self.error_message()))
        }
    }

    fn error_message(&self) -> String {
        let mut message = self
            .message
            .clone()
            .unwrap_or_else(|| "An error occurred".to_string());
        if !self.errors.is_empty() {
            let details: Vec<String> = self
                .errors
                .iter()
                .map(|e| match &e.field {
                    Some(field) => format!("{}: {}", field, e.message),
                    None => e.message.clone(),
                })
                .collect();
            message = format!("{} ({})", message, details.join("; "));
        }
        message
    }
}

/// Wrap a payload in a success envelope (used by the mock backend in tests)
pub fn success<T>(data: T) -> ApiEnvelope<T> {
    ApiEnvelope {
        success: true,
        data: Some(data),
        message: None,
        errors: Vec::new(),
    }
}

/// Build a failure envelope with a message
pub fn failure<T>(message: impl Into<String>) -> ApiEnvelope<T> {
    ApiEnvelope {
        success: false,
        data: None,
        message: Some(message.into()),
        errors: Vec::new(),
    }
}
