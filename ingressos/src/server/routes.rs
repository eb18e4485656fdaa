//! Router configuration for the ticket service.

use super::state::AppState;
use crate::api::{docs, tickets, validation};
use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Router,
};
use ingressos_web::{correlation_id_layer, handlers::health_check, permissive_cors};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Routes:
/// - `POST /gerar_ingresso`, `POST /validar_ingresso`
/// - `GET /apidocs`, `GET /apispec_1.json`
/// - `GET /health`, `GET /metrics`
///
/// Every route is wrapped (outermost first) in permissive CORS, HTTP
/// tracing and correlation-ID propagation.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .max_body_bytes
        .map_or_else(DefaultBodyLimit::disable, DefaultBodyLimit::max);

    Router::new()
        .route("/gerar_ingresso", post(tickets::gerar_ingresso))
        .route("/validar_ingresso", post(validation::validar_ingresso))
        .route("/apidocs", get(docs::swagger_ui))
        .route("/apidocs/", get(docs::swagger_ui))
        .route(docs::SPEC_PATH, get(docs::openapi_spec))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .with_state(state)
        .layer(body_limit)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(permissive_cors())
}

/// `GET /metrics` in Prometheus text format.
#[allow(clippy::unused_async)]
async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
