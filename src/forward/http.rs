//! HTTP forwarding path.
//!
//! # Responsibilities
//! - Re-encode the collected files into a fresh multipart body, same field
//!   name, same filenames, same order
//! - POST to the configured backend URL with the pre-shared key header
//! - Copy the backend's status and Content-Type verbatim; stream the body
//!   back without buffering it

use axum::body::Body;
use axum::http::header;
use axum::response::Response;
use reqwest::multipart::{Form, Part};

use crate::config::UpstreamConfig;
use crate::errors::{Error, Result};
use crate::forward::INTERNAL_KEY_HEADER;
use crate::upload::{UploadedFile, IMAGES_FIELD};

/// Forward the uploaded files to the backend over HTTP multipart.
///
/// Transport failures map to 502; the backend's own status (including its
/// error statuses) is relayed verbatim.
pub async fn forward(
    client: &reqwest::Client,
    upstream: &UpstreamConfig,
    files: Vec<UploadedFile>,
) -> Result<Response> {
    let count = files.len();
    let mut form = Form::new();
    for file in files {
        let part = Part::bytes(file.content.to_vec()).file_name(file.filename);
        form = form.part(IMAGES_FIELD, part);
    }

    tracing::info!(
        count = count,
        url = %upstream.http_url,
        "Forwarding images to stitcher over HTTP"
    );

    // Connection refused, DNS failure, timeout: all surface here.
    let upstream_response = client
        .post(&upstream.http_url)
        .header(INTERNAL_KEY_HEADER, upstream.shared_key.as_str())
        .multipart(form)
        .send()
        .await
        .map_err(Error::UpstreamUnavailable)?;

    let status = upstream_response.status();
    let content_type = upstream_response.headers().get(header::CONTENT_TYPE).cloned();

    tracing::debug!(status = %status, "Stitcher HTTP response received");

    let mut response = Response::builder().status(status);
    if let Some(content_type) = content_type {
        response = response.header(header::CONTENT_TYPE, content_type);
    }
    response
        .body(Body::from_stream(upstream_response.bytes_stream()))
        .map_err(|e| Error::Internal(format!("Failed to build response: {}", e)))
}
