//! Ticket generation endpoint.

use crate::metrics;
use crate::server::AppState;
use crate::ticket::TicketRequest;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use ingressos_web::{AppError, CorrelationId, WebResult};
use std::time::Instant;
use utoipa::ToSchema;

/// A rendered PNG, served as `image/png`.
#[derive(Debug, Clone, ToSchema)]
#[schema(value_type = String, format = Binary)]
pub struct PngImage(pub Vec<u8>);

impl IntoResponse for PngImage {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "image/png")], self.0).into_response()
    }
}

/// Gera um ingresso com QR code.
///
/// Encodes the ticket fields as a five-line text block and returns the QR
/// code as a PNG. Missing fields are not rejected.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/gerar_ingresso \
///   -H "Content-Type: application/json" \
///   -d '{"nome":"Ana","evento":"Show","data":"2024-01-01","hora":"20:00","local":"Arena"}' \
///   -o ingresso.png
/// ```
#[utoipa::path(
    post,
    path = "/gerar_ingresso",
    tag = "ingressos",
    request_body = TicketRequest,
    responses(
        (status = 200, description = "Imagem do QR code gerado.", content_type = "image/png", body = PngImage)
    )
)]
pub async fn gerar_ingresso(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(ticket): Json<TicketRequest>,
) -> WebResult<PngImage> {
    let started = Instant::now();
    let payload = ticket.payload();

    let rendered = state
        .encoder
        .encode(&payload)
        .and_then(|qr| qr.to_png().map(|png| (qr.version(), png)));

    let (version, png) = rendered.map_err(|e| {
        metrics::record_ticket_failure();
        AppError::internal("failed to render ticket QR code").with_source(e.into())
    })?;

    metrics::record_ticket_generated(started.elapsed());
    tracing::info!(
        correlation_id = %correlation_id.0,
        payload_len = payload.len(),
        qr_version = version,
        png_bytes = png.len(),
        "Ticket generated"
    );

    Ok(PngImage(png))
}
