//! Metrics collection and exposition.
//!
//! # Metrics
//! - `stitch_proxy_requests_total` (counter): requests by method, status,
//!   transport
//! - `stitch_proxy_request_duration_seconds` (histogram): end-to-end latency
//!   including the outbound call

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Failure to install is logged and ignored: the proxy keeps serving,
/// metric updates just go nowhere.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, transport: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    counter!(
        "stitch_proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "transport" => transport.to_string(),
    )
    .increment(1);
    histogram!(
        "stitch_proxy_request_duration_seconds",
        "transport" => transport.to_string(),
    )
    .record(elapsed);
}
