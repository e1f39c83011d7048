//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_gate_decisions_total` (counter): decisions by outcome and rule
//! - `locale_gate_upstream_requests_total` (counter): forwarded requests by status
//! - `locale_gate_upstream_duration_seconds` (histogram): origin latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Decision;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count one locale decision.
pub fn record_decision(decision: &Decision) {
    let outcome = match decision {
        Decision::Skip => "skip",
        Decision::Continue { .. } => "continue",
        Decision::Redirect(_) => "redirect",
    };
    metrics::counter!(
        "locale_gate_decisions_total",
        "outcome" => outcome,
        "rule" => decision.label()
    )
    .increment(1);
}

/// Record one forwarded request.
pub fn record_upstream(status: u16, start: Instant) {
    metrics::counter!(
        "locale_gate_upstream_requests_total",
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("locale_gate_upstream_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
