/*!
 * Prometheus metrics exposition.
 *
 * Individual counters are declared next to the operations they measure
 * (see the service modules) and register themselves with the default
 * registry; this module renders the registry in text format for `/metrics`.
 */

use prometheus::{Encoder, TextEncoder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to export metrics: {0}")]
    ExportError(String),
}

// HTTP endpoint handler for metrics
pub async fn metrics_handler() -> Result<String, MetricsError> {
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| MetricsError::ExportError(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| MetricsError::ExportError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handler_renders_registered_counters() {
        let counter = prometheus::register_int_counter!(
            "metrics_exposition_smoke_total",
            "Counter registered by the exposition test"
        )
        .expect("metric can be created");
        counter.inc();

        let body = metrics_handler().await.unwrap();
        assert!(body.contains("metrics_exposition_smoke_total 1"));
    }
}
