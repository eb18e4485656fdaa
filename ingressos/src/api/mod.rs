//! HTTP endpoints.
//!
//! - `POST /gerar_ingresso` - render a ticket as a QR-code PNG
//! - `POST /validar_ingresso` - ticket validation (always answers `valido`)
//! - `GET /apidocs`, `GET /apispec_1.json` - interactive API documentation

pub mod docs;
pub mod tickets;
pub mod validation;
