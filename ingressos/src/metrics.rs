//! Service metrics.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `ingressos_tickets_generated_total` - QR tickets successfully rendered
//! - `ingressos_ticket_failures_total` - ticket requests that failed to render
//! - `ingressos_validations_total{outcome}` - calls to the validation route
//!
//! ## Histograms
//! - `ingressos_qr_render_seconds` - time spent encoding and rasterizing a ticket

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Register metric descriptions. Call once at startup, after installing the recorder.
pub fn register_metrics() {
    describe_counter!(
        "ingressos_tickets_generated_total",
        "Total number of ticket QR codes rendered"
    );
    describe_counter!(
        "ingressos_ticket_failures_total",
        "Total number of ticket requests whose QR code could not be rendered"
    );
    describe_counter!(
        "ingressos_validations_total",
        "Total number of ticket validation requests by outcome (valid, missing_file)"
    );
    describe_histogram!(
        "ingressos_qr_render_seconds",
        "Time taken to encode a ticket payload and serialize it as PNG"
    );
}

/// Record a rendered ticket.
pub fn record_ticket_generated(elapsed: Duration) {
    counter!("ingressos_tickets_generated_total").increment(1);
    histogram!("ingressos_qr_render_seconds").record(elapsed.as_secs_f64());
}

/// Record a ticket that failed to render.
pub fn record_ticket_failure() {
    counter!("ingressos_ticket_failures_total").increment(1);
}

/// Record a validation request.
pub fn record_validation(outcome: &'static str) {
    counter!("ingressos_validations_total", "outcome" => outcome).increment(1);
}
