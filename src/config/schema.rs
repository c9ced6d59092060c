//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

/// Root configuration for the stitch proxy.
///
/// Immutable after startup; shared via `Arc` with every request handler.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend stitching service configuration.
    pub upstream: UpstreamConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Which outbound transport carries the images to the backend.
///
/// Resolved once at startup; never changes mid-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Re-encoded multipart POST to the backend's HTTP endpoint.
    #[default]
    Http,
    /// Single `Process` call to the backend's gRPC endpoint.
    Rpc,
}

impl TransportMode {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Http => "http",
            TransportMode::Rpc => "rpc",
        }
    }
}

/// Backend stitching service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Outbound transport selection.
    pub transport: TransportMode,

    /// Destination URL for the HTTP transport.
    pub http_url: String,

    /// Endpoint URI for the gRPC transport (scheme + host + port).
    pub rpc_endpoint: String,

    /// Pre-shared key forwarded to the backend
    /// (`x-internal-key` header on HTTP, `key` field on gRPC).
    pub shared_key: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            transport: TransportMode::default(),
            http_url: "http://localhost:8000/stitch".to_string(),
            rpc_endpoint: "http://localhost:50051".to_string(),
            shared_key: String::new(),
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted upload body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 100 * 1024 * 1024, // 100 MiB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
