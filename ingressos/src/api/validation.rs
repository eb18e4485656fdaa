//! Ticket validation endpoint.
//!
//! The route accepts an uploaded QR image under the `qrcode` file field and
//! always answers `{"status": "valido"}`. The upload is never read: there is
//! no ticket record to check it against. A request without that file part
//! (a plain `qrcode` text field does not count) fails with a bare 500.

use crate::metrics;
use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use ingressos_web::{AppError, CorrelationId, WebResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart field carrying the ticket image.
pub const QR_FIELD: &str = "qrcode";

/// Status reported for every accepted upload.
pub const STATUS_VALID: &str = "valido";

/// Validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    /// Validation status
    #[schema(example = "valido")]
    pub status: String,
}

/// Multipart form accepted by `POST /validar_ingresso`.
#[derive(Debug, ToSchema)]
pub struct QrCodeUpload {
    /// Ticket QR-code image
    #[schema(value_type = String, format = Binary)]
    pub qrcode: Vec<u8>,
}

/// Valida um ingresso com QR code.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/validar_ingresso -F qrcode=@ingresso.png
/// # {"status":"valido"}
/// ```
#[utoipa::path(
    post,
    path = "/validar_ingresso",
    tag = "ingressos",
    request_body(content = QrCodeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Status da validação.", body = ValidationResponse)
    )
)]
pub async fn validar_ingresso(
    correlation_id: CorrelationId,
    multipart: Result<Multipart, MultipartRejection>,
) -> WebResult<Json<ValidationResponse>> {
    let mut multipart = multipart.map_err(|rejection| {
        metrics::record_validation("missing_file");
        AppError::internal("validation request is not multipart/form-data")
            .with_source(anyhow::anyhow!(rejection.body_text()))
    })?;

    let upload = loop {
        let field = multipart.next_field().await.map_err(|e| {
            metrics::record_validation("missing_file");
            AppError::internal("malformed multipart body")
                .with_source(anyhow::anyhow!(e.body_text()))
        })?;

        let Some(field) = field else {
            break None;
        };

        if field.name() == Some(QR_FIELD) && field.file_name().is_some() {
            break Some((
                field.file_name().map(str::to_owned),
                field.content_type().map(str::to_owned),
            ));
        }
    };

    let Some((file_name, content_type)) = upload else {
        metrics::record_validation("missing_file");
        return Err(AppError::internal(format!(
            "multipart file field `{QR_FIELD}` is missing"
        )));
    };

    metrics::record_validation("valid");
    tracing::info!(
        correlation_id = %correlation_id.0,
        file_name = file_name.as_deref().unwrap_or("-"),
        content_type = content_type.as_deref().unwrap_or("-"),
        "Ticket validation requested"
    );

    Ok(Json(ValidationResponse {
        status: STATUS_VALID.to_string(),
    }))
}
