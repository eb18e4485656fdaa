//! Application state for the ticket HTTP server.

use crate::config::Config;
use crate::qr::QrEncoder;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// State shared across all HTTP handlers.
///
/// Requests share nothing mutable: the encoder is read-only and the metrics
/// handle only renders the recorder's snapshot.
#[derive(Clone)]
pub struct AppState {
    /// QR encoder built from configuration
    pub encoder: Arc<QrEncoder>,
    /// Prometheus recorder handle for `/metrics`
    pub metrics: PrometheusHandle,
    /// Maximum request body size (`None` = unlimited)
    pub max_body_bytes: Option<usize>,
}

impl AppState {
    /// Create application state from configuration.
    #[must_use]
    pub fn new(config: &Config, metrics: PrometheusHandle) -> Self {
        Self {
            encoder: Arc::new(QrEncoder::new(config.qr)),
            metrics,
            max_body_bytes: config.server.max_body_bytes,
        }
    }

    /// State with a private, uninstalled recorder.
    #[cfg(test)]
    pub(crate) fn for_tests(qr: crate::qr::QrOptions) -> Self {
        let config = Config {
            qr,
            ..Config::default()
        };
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        Self::new(&config, handle)
    }
}
