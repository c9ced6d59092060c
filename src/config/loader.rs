//! Configuration loading from disk and environment.
//!
//! Layering, lowest precedence first: built-in defaults, optional TOML file,
//! environment overrides (`GRPC`, `PANO_URL`, `PANO_KEY`). The merged config
//! is validated before the process starts serving.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::{ProxyConfig, TransportMode};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load, merge, and validate configuration.
///
/// `path = None` starts from pure defaults, which is a valid deployment:
/// defaults plus environment variables cover the common case.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = fs::read_to_string(p).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides. GRPC=true flips the transport; PANO_URL and
/// PANO_KEY replace the destination URL and shared key.
fn apply_env_overrides(config: &mut ProxyConfig) {
    if env::var("GRPC").map(|v| v == "true").unwrap_or(false) {
        config.upstream.transport = TransportMode::Rpc;
    }
    if let Ok(url) = env::var("PANO_URL") {
        if !url.is_empty() {
            config.upstream.http_url = url;
        }
    }
    if let Ok(key) = env::var("PANO_KEY") {
        config.upstream.shared_key = key;
    }
}
