//! # Vellum Common Library
//!
//! Shared code for the Vellum publishing console including:
//! - Data model and wire types (works, contributors, transactions)
//! - API response envelope
//! - Royalty split validation
//! - Configuration loading
//! - Error types

pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod splits;

pub use error::{Error, Result};
pub use splits::{SplitVerdict, SplitViolation};
