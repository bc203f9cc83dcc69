//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status
//! - `proxy_request_duration_seconds` (histogram): latency distribution
//! - `proxy_size_redirects_total` (counter): size-limit fallback redirects

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its scrape endpoint.
///
/// Failure to install is logged, not fatal: the proxy serves traffic
/// without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(error = %error, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one size-limit redirect.
pub fn record_size_redirect() {
    metrics::counter!("proxy_size_redirects_total").increment(1);
}
