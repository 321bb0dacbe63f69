//! Configuration loading and endpoint resolution
//!
//! Console settings resolve through a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`<config dir>/vellum/config.toml`)
//! 4. Compiled default (fallback)
//!
//! A missing config file degrades to defaults with a warning; it never
//! terminates the console.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Default publishing API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// Default chain service base URL
pub const DEFAULT_CHAIN_BASE_URL: &str = "http://localhost:9090";

/// Environment variable for the publishing API base URL
pub const ENV_API_URL: &str = "VELLUM_API_URL";
/// Environment variable for the chain service base URL
pub const ENV_CHAIN_URL: &str = "VELLUM_CHAIN_URL";
/// Environment variable for the bearer access token
pub const ENV_ACCESS_TOKEN: &str = "VELLUM_ACCESS_TOKEN";

/// Resolved console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Publishing API base URL (works, contributors, auth)
    pub api_base_url: String,
    /// Chain registration service base URL
    pub chain_base_url: String,
    /// Bearer token for authenticated endpoints
    pub access_token: Option<String>,
}

/// Raw TOML config file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub api_base_url: Option<String>,
    pub chain_base_url: Option<String>,
    pub access_token: Option<String>,
}

impl TomlConfig {
    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Load from the default location, degrading to defaults when absent
    pub fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            warn!("Could not determine config directory, using compiled defaults");
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No config file found, using compiled defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config file");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                Self::default()
            }
        }
    }
}

/// Default config file path: `<config dir>/vellum/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vellum").join("config.toml"))
}

/// Resolve a single setting through the CLI → ENV → TOML → default chain
fn resolve_setting(
    cli: Option<&str>,
    env_var: &str,
    toml_value: Option<&str>,
    default: Option<&str>,
) -> Option<String> {
    if let Some(value) = cli {
        return Some(value.to_string());
    }
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Some(value);
        }
    }
    if let Some(value) = toml_value {
        return Some(value.to_string());
    }
    default.map(str::to_string)
}

impl ConsoleConfig {
    /// Resolve the full configuration from CLI arguments and a loaded TOML file
    pub fn resolve(
        cli_api_url: Option<&str>,
        cli_chain_url: Option<&str>,
        cli_token: Option<&str>,
        toml_config: &TomlConfig,
    ) -> Self {
        let api_base_url = resolve_setting(
            cli_api_url,
            ENV_API_URL,
            toml_config.api_base_url.as_deref(),
            Some(DEFAULT_API_BASE_URL),
        )
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let chain_base_url = resolve_setting(
            cli_chain_url,
            ENV_CHAIN_URL,
            toml_config.chain_base_url.as_deref(),
            Some(DEFAULT_CHAIN_BASE_URL),
        )
        .unwrap_or_else(|| DEFAULT_CHAIN_BASE_URL.to_string());

        let access_token = resolve_setting(
            cli_token,
            ENV_ACCESS_TOKEN,
            toml_config.access_token.as_deref(),
            None,
        );

        debug!(
            api_base_url = %api_base_url,
            chain_base_url = %chain_base_url,
            has_token = access_token.is_some(),
            "Resolved console configuration"
        );

        Self {
            api_base_url,
            chain_base_url,
            access_token,
        }
    }
}
