//! OpenAPI document and Swagger UI page.

use super::{tickets, validation};
use crate::ticket::TicketRequest;
use axum::{response::Html, Json};
use utoipa::OpenApi;

/// Path the OpenAPI JSON document is served from.
pub const SPEC_PATH: &str = "/apispec_1.json";

/// OpenAPI description of the ticket routes.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Ingressos",
        version = "1.0.0",
        description = "API para gerar e validar ingressos com QR code."
    ),
    paths(tickets::gerar_ingresso, validation::validar_ingresso),
    components(schemas(
        TicketRequest,
        tickets::PngImage,
        validation::ValidationResponse,
        validation::QrCodeUpload
    )),
    tags((name = "ingressos", description = "Geração e validação de ingressos"))
)]
pub struct ApiDoc;

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8" />
  <title>API de Ingressos</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/apispec_1.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// `GET /apispec_1.json`
#[allow(clippy::unused_async)]
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `GET /apidocs`
#[allow(clippy::unused_async)]
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_both_routes() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(json["info"]["title"], "API de Ingressos");
        assert!(json["paths"]["/gerar_ingresso"]["post"].is_object());
        assert!(json["paths"]["/validar_ingresso"]["post"].is_object());
    }

    #[test]
    fn test_ticket_schema_has_all_fields() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let properties = &json["components"]["schemas"]["TicketRequest"]["properties"];
        for field in ["nome", "evento", "data", "hora", "local"] {
            assert!(properties[field].is_object(), "missing {field}");
        }
    }

    #[test]
    fn test_swagger_page_points_at_spec() {
        assert!(SWAGGER_UI.contains(SPEC_PATH));
    }

    #[test]
    fn test_swagger_page_is_complete() {
        assert!(SWAGGER_UI.contains(r##"dom_id: "#swagger-ui""##));
        assert!(SWAGGER_UI.trim_end().ends_with("</html>"));
    }
}
