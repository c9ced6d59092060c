//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, body limit, CORS headers)
//!     → handler.rs (method handling, ingest, transport dispatch)
//!     → forward::{http, rpc} (outbound call)
//!     → response normalized and sent to client
//! ```

pub mod handler;
pub mod server;

pub use server::{AppState, HttpServer};
