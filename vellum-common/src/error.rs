//! Common error types for Vellum

use thiserror::Error;

/// Common result type for Vellum operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Vellum console
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Publishing API rejected the request (`success: false` envelope)
    #[error("API error: {0}")]
    Api(String),

    /// Chain service rejected the request
    #[error("Chain error: {0}")]
    Chain(String),

    /// Credential missing or expired; caller must re-authenticate
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
