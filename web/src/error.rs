//! Error types for web handlers.
//!
//! `AppError` is the single error type returned by handlers. The service
//! only fails on the server side, so every error is logged in full and
//! rendered as the bare reason phrase: nothing about the failure reaches
//! the client.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Vec<u8>, AppError> {
///     let png = encoder.encode(&payload)
///         .map_err(|e| AppError::internal("QR encoding failed").with_source(e.into()))?;
///     Ok(png)
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (log-only)
    message: String,
    /// Error code (log-only)
    code: &'static str,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    const fn new(status: StatusCode, message: String, code: &'static str) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Attach the underlying error. It is logged, never serialized.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self.source {
            Some(source) => tracing::error!(
                status = %self.status,
                code = self.code,
                message = %self.message,
                error = %source,
                "Internal server error"
            ),
            None => tracing::error!(
                status = %self.status,
                code = self.code,
                message = %self.message,
                "Internal server error"
            ),
        }

        let reason = self
            .status
            .canonical_reason()
            .unwrap_or("Internal Server Error");
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            reason,
        )
            .into_response()
    }
}
