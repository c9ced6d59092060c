//! gRPC forwarding path.
//!
//! # Responsibilities
//! - Materialize every file into a `StitchRequest` message (the RPC model
//!   is non-streaming, so full buffering is required)
//! - Dial the backend endpoint, issue one `Process` call
//! - Map the response message onto an HTTP response: Content-Type from the
//!   message, Content-Disposition attachment with the backend's filename
//!
//! The channel is established per call and dropped when this function
//! returns, on success and on every error path alike, so no connection
//! outlives its request.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;

use crate::config::UpstreamConfig;
use crate::errors::{Error, Result};
use crate::forward::STITCH_FORMAT;
use crate::proto::stitcher_client::StitcherClient;
use crate::proto::{ImageData, StitchRequest};
use crate::upload::UploadedFile;

/// Forward the uploaded files to the backend over gRPC.
pub async fn forward(upstream: &UpstreamConfig, files: Vec<UploadedFile>) -> Result<Response> {
    tracing::debug!(endpoint = %upstream.rpc_endpoint, "Connecting to stitcher gRPC service");

    let mut client = StitcherClient::connect(upstream.rpc_endpoint.clone())
        .await
        .map_err(Error::RpcConnect)?;

    let images: Vec<ImageData> = files
        .into_iter()
        .map(|file| ImageData {
            filename: file.filename,
            content: file.content.to_vec(),
        })
        .collect();

    tracing::info!(
        count = images.len(),
        endpoint = %upstream.rpc_endpoint,
        "Sending gRPC stitch request"
    );

    let request = StitchRequest {
        images,
        format: STITCH_FORMAT.to_string(),
        key: upstream.shared_key.clone(),
    };

    let response = client
        .process(request)
        .await
        .map_err(Error::RpcCall)?
        .into_inner();

    tracing::info!(
        content_type = %response.content_type,
        filename = %response.filename,
        size = response.stitched_image.len(),
        "Received stitched image"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, response.content_type.as_str())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", response.filename),
        )
        .body(Body::from(response.stitched_image))
        .map_err(|e| Error::Internal(format!("Failed to build response: {}", e)))
}
