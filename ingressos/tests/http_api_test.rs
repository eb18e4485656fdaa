//! HTTP API integration tests.
//!
//! Drives the full router (CORS, tracing, correlation IDs, body limits)
//! through `tower::ServiceExt::oneshot`, without binding a socket.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use ingressos::{build_router, AppState, Config};
use ingressos_web::CORRELATION_ID_HEADER;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "ingressos-test-boundary";

fn app() -> Router {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    build_router(AppState::new(&Config::default(), handle))
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

fn ticket_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/gerar_ingresso")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/validar_ingresso")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn decode_qr(png: &[u8]) -> String {
    let luma = image::load_from_memory(png).unwrap().to_luma8();
    let (width, height) = luma.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code in the image");
    let (_meta, content) = grids[0].decode().unwrap();
    content
}

// ============================================================================
// POST /gerar_ingresso
// ============================================================================

#[tokio::test]
async fn test_gerar_ingresso_returns_png() {
    let response = app()
        .oneshot(ticket_request(&json!({
            "nome": "Ana",
            "evento": "Show",
            "data": "2024-01-01",
            "hora": "20:00",
            "local": "Arena",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let png = body_bytes(response).await;
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert!(image::load_from_memory_with_format(&png, image::ImageFormat::Png).is_ok());
}

#[tokio::test]
async fn test_gerar_ingresso_qr_decodes_to_payload() {
    let response = app()
        .oneshot(ticket_request(&json!({
            "nome": "Ana",
            "evento": "Show",
            "data": "2024-01-01",
            "hora": "20:00",
            "local": "Arena",
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let png = body_bytes(response).await;
    assert_eq!(
        decode_qr(&png),
        "Nome: Ana\nEvento: Show\nData: 2024-01-01\nHora: 20:00\nLocal: Arena"
    );
}

#[tokio::test]
async fn test_gerar_ingresso_accepts_missing_field() {
    let response = app()
        .oneshot(ticket_request(&json!({
            "nome": "Ana",
            "evento": "Show",
            "data": "2024-01-01",
            "hora": "20:00",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let png = body_bytes(response).await;
    assert_eq!(
        decode_qr(&png),
        "Nome: Ana\nEvento: Show\nData: 2024-01-01\nHora: 20:00\nLocal: None"
    );
}

#[tokio::test]
async fn test_gerar_ingresso_accepts_empty_object() {
    let response = app().oneshot(ticket_request(&json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_gerar_ingresso_non_object_body_is_rejected_by_extractor() {
    for body in [json!(null), json!("Ana"), json!(42)] {
        let response = app().oneshot(ticket_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
    }
}

#[tokio::test]
async fn test_gerar_ingresso_echoes_correlation_id() {
    let mut request = ticket_request(&json!({"nome": "Ana"}));
    request.headers_mut().insert(
        CORRELATION_ID_HEADER,
        "6f1c1d4e-2b7a-4d8e-9c3f-0a1b2c3d4e5f".parse().unwrap(),
    );

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[CORRELATION_ID_HEADER],
        "6f1c1d4e-2b7a-4d8e-9c3f-0a1b2c3d4e5f"
    );
}

// ============================================================================
// POST /validar_ingresso
// ============================================================================

#[tokio::test]
async fn test_validar_ingresso_always_valid() {
    let response = app()
        .oneshot(multipart_request(&[("qrcode", Some("ingresso.png"), &b"x"[..])]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, json!({"status": "valido"}));
}

#[tokio::test]
async fn test_validar_ingresso_ignores_other_fields() {
    let response = app()
        .oneshot(multipart_request(&[
            ("comentario", None, &b"primeira fila"[..]),
            ("qrcode", Some("ingresso.png"), &b"\x00\x01\x02 not an image"[..]),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_validar_ingresso_without_file_is_server_error() {
    let response = app()
        .oneshot(multipart_request(&[("outro", Some("a.png"), &b"x"[..])]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(serde_json::from_slice::<Value>(&body_bytes(response).await).is_err());
}

#[tokio::test]
async fn test_validar_ingresso_text_field_is_not_a_file() {
    let response = app()
        .oneshot(multipart_request(&[("qrcode", None, &b"Nome: Ana"[..])]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_validar_ingresso_without_body_is_server_error() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/validar_ingresso")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// CORS, docs
// ============================================================================

#[tokio::test]
async fn test_preflight_succeeds_on_both_routes() {
    for uri in ["/gerar_ingresso", "/validar_ingresso"] {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(uri)
                    .header(header::ORIGIN, "https://bilheteria.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success(), "preflight failed for {uri}");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

#[tokio::test]
async fn test_cross_origin_post_gets_allow_origin() {
    let mut request = ticket_request(&json!({"nome": "Ana"}));
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://bilheteria.example".parse().unwrap());

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/apispec_1.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let spec: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(spec["paths"]["/gerar_ingresso"].is_object());
    assert!(spec["paths"]["/validar_ingresso"].is_object());
}
