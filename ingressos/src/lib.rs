//! Event ticket QR-code service.
//!
//! Two routes make up the service:
//!
//! - **`POST /gerar_ingresso`** takes the ticket fields (`nome`, `evento`,
//!   `data`, `hora`, `local`), renders them as a five-line text block and
//!   answers with that text encoded as a QR-code PNG.
//! - **`POST /validar_ingresso`** takes an uploaded image under the
//!   `qrcode` field and answers `{"status": "valido"}`. It does not decode
//!   or check anything.
//!
//! Nothing is persisted: each request is independent and owns its buffers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  api::*      │ →  │  ticket      │ →  │  qr          │
//! │  (handlers)  │    │  (payload)   │    │  (QR → PNG)  │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod metrics;
pub mod qr;
pub mod server;
pub mod ticket;

pub use config::{Config, ConfigError};
pub use qr::{EncodeError, ErrorCorrection, QrEncoder, QrImage, QrOptions};
pub use server::{build_router, AppState};
pub use ticket::TicketRequest;
