use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stitch_proxy::config::{self, TransportMode};
use stitch_proxy::{observability, HttpServer, Shutdown};

/// Protocol-translating proxy for the image stitching service.
#[derive(Parser, Debug)]
#[command(name = "stitch-proxy", version)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted; the GRPC,
    /// PANO_URL and PANO_KEY environment variables override either way.
    #[arg(long, env = "STITCH_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = config::load_config(args.config.as_deref())?;

    // Initialize tracing subscriber; RUST_LOG wins over the config level.
    let default_filter = format!(
        "stitch_proxy={level},tower_http={level}",
        level = config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("stitch-proxy v0.1.0 starting");

    match config.upstream.transport {
        TransportMode::Rpc => tracing::info!(
            endpoint = %config.upstream.rpc_endpoint,
            "gRPC mode enabled, forwarding uploads to stitcher gRPC service"
        ),
        TransportMode::Http => tracing::info!(
            url = %config.upstream.http_url,
            "HTTP mode enabled, forwarding uploads to stitcher over HTTP"
        ),
    }

    if config.observability.metrics_enabled {
        // Validated at load time, so this parse cannot fail here.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        max_upload_bytes = config.limits.max_upload_bytes,
        "Listening for uploads"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();
    let server_shutdown = shutdown.subscribe();

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
