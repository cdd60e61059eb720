//! # Prometheus Metrics
//!
//! Operational metrics for the explorer server, scraped at `/metrics` on the
//! configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] with
//! the `explorer` prefix so they do not collide with the default registry.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the server.
#[derive(Clone)]
pub struct ExplorerMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Snapshots successfully served by `GET /api/blockchain`. Failed
    /// requests count in `snapshot_errors_total` instead.
    pub snapshot_requests_total: IntCounter,
    /// Pages rendered by `GET /explorer`.
    pub page_renders_total: IntCounter,
    /// Snapshot fetches that failed at the provider.
    pub snapshot_errors_total: IntCounter,
    /// Number of blocks in the most recently served snapshot.
    pub snapshot_blocks: IntGauge,
    /// Time spent obtaining a snapshot from the provider.
    pub snapshot_fetch_seconds: Histogram,
}

impl ExplorerMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("explorer".into()), None)
            .expect("failed to create prometheus registry");

        let snapshot_requests_total = IntCounter::new(
            "snapshot_requests_total",
            "Total number of chain snapshots served as JSON",
        )
        .expect("metric creation");
        registry
            .register(Box::new(snapshot_requests_total.clone()))
            .expect("metric registration");

        let page_renders_total = IntCounter::new(
            "page_renders_total",
            "Total number of explorer pages rendered server-side",
        )
        .expect("metric creation");
        registry
            .register(Box::new(page_renders_total.clone()))
            .expect("metric registration");

        let snapshot_errors_total = IntCounter::new(
            "snapshot_errors_total",
            "Total number of failed snapshot fetches",
        )
        .expect("metric creation");
        registry
            .register(Box::new(snapshot_errors_total.clone()))
            .expect("metric registration");

        let snapshot_blocks = IntGauge::new(
            "snapshot_blocks",
            "Number of blocks in the last snapshot served",
        )
        .expect("metric creation");
        registry
            .register(Box::new(snapshot_blocks.clone()))
            .expect("metric registration");

        let snapshot_fetch_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "snapshot_fetch_seconds",
                "Time taken to obtain a snapshot from the provider, in seconds",
            )
            .buckets(vec![0.0001, 0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(snapshot_fetch_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            snapshot_requests_total,
            page_renders_total,
            snapshot_errors_total,
            snapshot_blocks,
            snapshot_fetch_seconds,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}

impl Default for ExplorerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics handle passed to axum handlers.
pub type SharedMetrics = Arc<ExplorerMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
