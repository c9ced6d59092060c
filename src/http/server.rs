//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the stitch and health routes
//! - Wire up middleware (CORS headers, body limit, tracing, request ID)
//! - Hold the shared application state (config + outbound HTTP client)
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::handler;

/// Application state injected into handlers.
///
/// Everything here is read-only after startup: the config is immutable and
/// the reqwest client is internally synchronized, so concurrent requests
/// share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: reqwest::Client,
}

/// HTTP server for the stitch proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        // One outbound client for the process; connections are pooled by
        // reqwest and never shared across concurrent request bodies.
        let client = reqwest::Client::new();

        let state = AppState {
            config: Arc::new(config.clone()),
            client,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let x_request_id = HeaderName::from_static("x-request-id");

        // The CORS trio goes on every response, error responses included.
        Router::new()
            .route(
                "/stitch",
                post(handler::stitch_handler).options(handler::preflight_handler),
            )
            .route("/healthz", get(handler::healthz_handler))
            .method_not_allowed_fallback(handler::method_not_allowed)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(x_request_id))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_ALLOW_ORIGIN,
                        HeaderValue::from_static("*"),
                    ))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_ALLOW_METHODS,
                        HeaderValue::from_static("POST, OPTIONS"),
                    ))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_ALLOW_HEADERS,
                        HeaderValue::from_static("Content-Type, x-internal-key"),
                    ))
                    .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes)),
            )
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
