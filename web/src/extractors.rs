//! Custom Axum extractors.
//!
//! # Examples
//!
//! ```ignore
//! use ingressos_web::extractors::CorrelationId;
//!
//! async fn handler(correlation_id: CorrelationId) -> String {
//!     tracing::info!(correlation_id = %correlation_id.0, "Processing request");
//!     "ok".to_string()
//! }
//! ```

use crate::middleware::{parse_correlation_id, CORRELATION_ID_HEADER};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the ID stored by [`correlation_id_layer`](crate::correlation_id_layer)
/// so handler logs and the response header agree. Without the layer it falls
/// back to the `X-Correlation-ID` header, then to a fresh UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parse_correlation_id(
            parts
                .headers
                .get(CORRELATION_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
        );

        Ok(Self(correlation_id))
    }
}
