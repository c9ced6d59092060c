//! Request handlers.
//!
//! The `/stitch` handler is the single entry point for uploads:
//! ingest the multipart form, dispatch on the process-wide transport mode,
//! and write exactly one response whichever path was taken.

use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::TransportMode;
use crate::errors::Error;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::{forward, upload};

/// POST /stitch.
pub async fn stitch_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let start = Instant::now();
    let transport = state.config.upstream.transport;

    let response = match process(&state, multipart).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                transport = transport.as_str(),
                error = %err,
                "Stitch request failed"
            );
            err.into_response()
        }
    };

    metrics::record_request("POST", response.status().as_u16(), transport.as_str(), start);
    response
}

async fn process(state: &AppState, multipart: Multipart) -> Result<Response, Error> {
    // 1. Ingest the upload
    let files = upload::collect_images(multipart).await?;

    // 2. Dispatch on the transport mode fixed at startup
    match state.config.upstream.transport {
        TransportMode::Http => {
            forward::http::forward(&state.client, &state.config.upstream, files).await
        }
        TransportMode::Rpc => forward::rpc::forward(&state.config.upstream, files).await,
    }
}

/// OPTIONS /stitch. CORS preflight short-circuit: 200, empty body.
/// The CORS headers themselves are applied by the router's header layers.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Any verb other than POST or OPTIONS on a known path.
pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

/// GET /healthz liveness probe.
pub async fn healthz_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
