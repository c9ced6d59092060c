//! Upload ingestion.
//!
//! # Responsibilities
//! - Parse the inbound multipart form
//! - Collect every file part submitted under the `images` field
//! - Preserve submission order
//!
//! The total body size cap is enforced upstream by the router's body limit
//! layer, so an oversize upload surfaces here as a failed part read.

use axum::extract::multipart::Multipart;
use bytes::Bytes;

use crate::errors::{Error, Result};

/// Field name the frontend submits image files under.
pub const IMAGES_FIELD: &str = "images";

/// One uploaded image, held in memory for the lifetime of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Bytes,
}

/// Drain the multipart stream and collect the `images` file parts, in the
/// order they were submitted.
///
/// Fails with `BadUpload` on malformed multipart data, on a part that cannot
/// be read in full, or when no `images` part is present at all.
pub async fn collect_images(mut multipart: Multipart) -> Result<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadUpload(format!("Failed to parse form: {}", e)))?
    {
        if field.name() != Some(IMAGES_FIELD) {
            // Unknown fields are skipped, not rejected.
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("upload-{}", files.len()));

        let content = field
            .bytes()
            .await
            .map_err(|e| Error::BadUpload(format!("Failed to read file: {}", e)))?;

        tracing::debug!(filename = %filename, size = content.len(), "Collected image part");
        files.push(UploadedFile { filename, content });
    }

    if files.is_empty() {
        return Err(Error::BadUpload("No images field found".to_string()));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "test-boundary";

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                        name, f
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn ingest(parts: &[(&str, Option<&str>, &[u8])]) -> Result<Vec<UploadedFile>> {
        let request = multipart_request(parts);
        let multipart = Multipart::from_request(request, &()).await.unwrap();
        collect_images(multipart).await
    }

    #[tokio::test]
    async fn test_collects_in_submission_order() {
        let files = ingest(&[
            ("images", Some("a.jpg"), b"\xFF\xD8aaa"),
            ("images", Some("b.jpg"), b"\xFF\xD8bbb"),
        ])
        .await
        .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "a.jpg");
        assert_eq!(files[0].content.as_ref(), b"\xFF\xD8aaa");
        assert_eq!(files[1].filename, "b.jpg");
        assert_eq!(files[1].content.as_ref(), b"\xFF\xD8bbb");
    }

    #[tokio::test]
    async fn test_skips_unrelated_fields() {
        let files = ingest(&[
            ("comment", None, b"ignore me"),
            ("images", Some("only.png"), b"PNGDATA"),
        ])
        .await
        .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "only.png");
    }

    #[tokio::test]
    async fn test_rejects_empty_upload() {
        let err = ingest(&[("comment", None, b"no images here")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No images field found"));
    }

    #[tokio::test]
    async fn test_generates_placeholder_filename() {
        let files = ingest(&[("images", None, b"raw")]).await.unwrap();
        assert_eq!(files[0].filename, "upload-0");
    }
}
