//! Metrics collection and exposition.
//!
//! # Metrics
//! - `student_api_requests_total` (counter): requests by method, route, status
//! - `student_api_request_duration_seconds` (histogram): latency distribution
//! - `student_api_store_records` (gauge): records currently in the store
//!
//! Without an installed recorder every call is a no-op, so the store and the
//! handlers can record unconditionally.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_owned()),
        ("route", route.to_owned()),
        ("status", status.to_string()),
    ];
    metrics::counter!("student_api_requests_total", &labels).increment(1);
    metrics::histogram!("student_api_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current number of stored records.
pub fn record_store_size(size: usize) {
    metrics::gauge!("student_api_store_records").set(size as f64);
}

/// Route-level middleware timing every matched request.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;

    record_request(&method, &route, response.status().as_u16(), start);
    response
}
