//! Stitch Proxy
//!
//! A protocol-translating proxy in front of an image-stitching service.
//! Clients upload images as `multipart/form-data`; the proxy re-encodes the
//! payload and forwards it over one of two transports, selected once at
//! startup:
//!
//! ```text
//!                          ┌──────────────────────────────────────────┐
//!                          │               STITCH PROXY               │
//!                          │                                          │
//!  POST /stitch            │  ┌────────┐   ┌────────┐   ┌──────────┐  │
//!  ────────────────────────┼─▶│  http  │──▶│ upload │──▶│ forward  │  │
//!  (multipart, images=...) │  │ server │   │ ingest │   │ dispatch │  │
//!                          │  └────────┘   └────────┘   └────┬─────┘  │
//!                          │                                 │        │
//!                          │              transport = http?  │  rpc?  │
//!                          │               ┌─────────────────┴──────┐ │
//!                          │               ▼                        ▼ │
//!                          │  ┌─────────────────────┐  ┌───────────┐ │
//!  stitched image          │  │ multipart POST +    │  │ gRPC      │ │      Backend
//!  ◀───────────────────────┼──│ x-internal-key      │  │ Process() │─┼────▶ Stitcher
//!                          │  └─────────────────────┘  └───────────┘ │
//!                          └──────────────────────────────────────────┘
//! ```
//!
//! The proxy never stitches anything itself; it relays bytes and metadata
//! and normalizes the two backend response shapes into one HTTP response.

pub mod config;
pub mod errors;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upload;

/// Generated gRPC bindings for the backend stitcher contract.
pub mod proto {
    #![allow(missing_docs)]
    tonic::include_proto!("stitcher.v1");
}

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
