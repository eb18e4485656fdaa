//! Axum middleware for request tracking and cross-origin access.
//!
//! - **Correlation ID tracking**: reuse the caller's `X-Correlation-ID` or
//!   mint a UUID, expose it to handlers and echo it on the response.
//! - **CORS**: a fully permissive policy so browser front-ends on any origin
//!   can call the API.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use ingressos_web::middleware::{correlation_id_layer, permissive_cors};
//!
//! let app = Router::new()
//!     .route("/gerar_ingresso", post(gerar_ingresso))
//!     .layer(correlation_id_layer())
//!     .layer(permissive_cors());
//! ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// CORS layer allowing any origin, method and header.
///
/// Preflight `OPTIONS` requests are answered by the layer itself and never
/// reach the handlers.
#[must_use]
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Create a layer that adds correlation ID tracking to all requests.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = parse_correlation_id(
            req.headers()
                .get(CORRELATION_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
        );

        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response
                    .headers_mut()
                    .insert(CORRELATION_ID_HEADER, header_value);
            }

            Ok(response)
        })
    }
}

/// Parse a caller-supplied correlation ID, minting a fresh one when the
/// header is missing or not a UUID.
pub(crate) fn parse_correlation_id(raw: Option<&str>) -> Uuid {
    raw.and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}
