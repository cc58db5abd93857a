//! Metrics collection and exposition.
//!
//! # Metrics
//! - `title_resolutions_total` (counter): resolved titles by source
//!   (`static`, `callback`, `site_name`)
//! - `title_resolution_errors_total` (counter): failures by kind
//! - `title_resolution_duration_seconds` (histogram): resolution latency
//! - `title_routes` (gauge): routes in the active collection
//!
//! # Design Decisions
//! - Without an installed exporter every call is a no-op
//! - Labels are static strings only

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

pub fn record_resolution(source: &'static str, started: Instant) {
    counter!("title_resolutions_total", "source" => source).increment(1);
    histogram!("title_resolution_duration_seconds").record(started.elapsed().as_secs_f64());
}

pub fn record_error(kind: &'static str) {
    counter!("title_resolution_errors_total", "kind" => kind).increment(1);
}

pub fn record_route_count(count: usize) {
    gauge!("title_routes").set(count as f64);
}
