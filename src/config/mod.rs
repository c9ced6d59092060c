//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → env overrides: GRPC / PANO_URL / PANO_KEY (loader.rs)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the transport mode in particular is
//!   fixed for the process lifetime (no mid-flight switching)
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LimitsConfig, ListenerConfig, ProxyConfig, TransportMode, UpstreamConfig};
