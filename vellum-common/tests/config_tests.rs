//! Configuration resolution tests
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate VELLUM_* variables are marked with #[serial].

use serial_test::serial;
use std::env;
use std::io::Write;

use vellum_common::config::{
    ConsoleConfig, TomlConfig, DEFAULT_API_BASE_URL, DEFAULT_CHAIN_BASE_URL, ENV_ACCESS_TOKEN,
    ENV_API_URL, ENV_CHAIN_URL,
};

fn clear_env() {
    env::remove_var(ENV_API_URL);
    env::remove_var(ENV_CHAIN_URL);
    env::remove_var(ENV_ACCESS_TOKEN);
}

#[test]
#[serial]
fn defaults_apply_when_nothing_is_configured() {
    clear_env();
    let config = ConsoleConfig::resolve(None, None, None, &TomlConfig::default());

    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.chain_base_url, DEFAULT_CHAIN_BASE_URL);
    assert!(config.access_token.is_none());
}

#[test]
#[serial]
fn cli_argument_beats_env_and_toml() {
    clear_env();
    env::set_var(ENV_API_URL, "http://env.example/api");
    let toml = TomlConfig {
        api_base_url: Some("http://toml.example/api".to_string()),
        ..Default::default()
    };

    let config = ConsoleConfig::resolve(Some("http://cli.example/api"), None, None, &toml);
    assert_eq!(config.api_base_url, "http://cli.example/api");

    clear_env();
}

#[test]
#[serial]
fn env_beats_toml() {
    clear_env();
    env::set_var(ENV_CHAIN_URL, "http://env.example:9090");
    let toml = TomlConfig {
        chain_base_url: Some("http://toml.example:9090".to_string()),
        ..Default::default()
    };

    let config = ConsoleConfig::resolve(None, None, None, &toml);
    assert_eq!(config.chain_base_url, "http://env.example:9090");

    clear_env();
}

#[test]
#[serial]
fn toml_beats_default() {
    clear_env();
    let toml = TomlConfig {
        api_base_url: Some("http://toml.example/api".to_string()),
        access_token: Some("toml-token".to_string()),
        ..Default::default()
    };

    let config = ConsoleConfig::resolve(None, None, None, &toml);
    assert_eq!(config.api_base_url, "http://toml.example/api");
    assert_eq!(config.access_token.as_deref(), Some("toml-token"));
}

#[test]
#[serial]
fn empty_env_var_is_ignored() {
    clear_env();
    env::set_var(ENV_ACCESS_TOKEN, "");

    let config = ConsoleConfig::resolve(None, None, None, &TomlConfig::default());
    assert!(config.access_token.is_none());

    clear_env();
}

#[test]
fn toml_file_parses_known_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "api_base_url = \"http://file.example/api\"\naccess_token = \"file-token\""
    )
    .unwrap();

    let toml = TomlConfig::load_from(file.path()).unwrap();
    assert_eq!(toml.api_base_url.as_deref(), Some("http://file.example/api"));
    assert_eq!(toml.access_token.as_deref(), Some("file-token"));
    assert!(toml.chain_base_url.is_none());
}

#[test]
fn unreadable_toml_file_is_an_error() {
    let result = TomlConfig::load_from(std::path::Path::new("/nonexistent/vellum/config.toml"));
    assert!(result.is_err());
}

#[test]
fn malformed_toml_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_base_url = [not valid").unwrap();
    assert!(TomlConfig::load_from(file.path()).is_err());
}
