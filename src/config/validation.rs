//! Semantic configuration checks.
//!
//! Serde handles the syntactic layer; this module rejects configs that parse
//! but cannot work (unparseable addresses, zero limits).

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single failed check, pointing at the offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration. Returns all failures, not just the first.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    if let Err(e) = Url::parse(&config.upstream.http_url) {
        errors.push(ValidationError {
            field: "upstream.http_url".into(),
            message: format!("not a valid URL: {}", e),
        });
    }

    match Url::parse(&config.upstream.rpc_endpoint) {
        Ok(url) => {
            if url.host_str().is_none() {
                errors.push(ValidationError {
                    field: "upstream.rpc_endpoint".into(),
                    message: "endpoint has no host".into(),
                });
            }
        }
        Err(e) => {
            errors.push(ValidationError {
                field: "upstream.rpc_endpoint".into(),
                message: format!("not a valid endpoint URI: {}", e),
            });
        }
    }

    if config.limits.max_upload_bytes == 0 {
        errors.push(ValidationError {
            field: "limits.max_upload_bytes".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".into(),
            message: format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_addresses() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.http_url = "::nope::".into();
        config.limits.max_upload_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "listener.bind_address"));
        assert!(errors.iter().any(|e| e.field == "upstream.http_url"));
        assert!(errors.iter().any(|e| e.field == "limits.max_upload_bytes"));
    }
}
