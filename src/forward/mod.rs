//! Outbound forwarding to the backend stitching service.
//!
//! # Data Flow
//! ```text
//! Vec<UploadedFile>
//!     → http.rs  (re-encoded multipart POST, status/body copied back)
//!   or → rpc.rs  (single Process call, response fields mapped back)
//! ```
//!
//! Which path runs is decided once per process by
//! [`TransportMode`](crate::config::TransportMode); the two paths never mix
//! within a request.

pub mod http;
pub mod rpc;

/// Output format requested from the backend: always webp, regardless of the
/// input image formats.
pub const STITCH_FORMAT: &str = "webp";

/// Header carrying the pre-shared key on the outbound HTTP path.
pub const INTERNAL_KEY_HEADER: &str = "x-internal-key";
