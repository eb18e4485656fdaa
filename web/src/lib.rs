//! Axum plumbing shared by the ingressos services.
//!
//! Handlers stay thin: they parse the request, call into the domain crate
//! and map the outcome to a response. This crate owns everything around
//! that core which is not specific to tickets.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   CORS  →  tracing  →  correlation ID   │  ← middleware
//! ├─────────────────────────────────────────┤
//! │   handler (extractors, AppError)        │
//! ├─────────────────────────────────────────┤
//! │   domain (payload, QR encoder)          │
//! └─────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{correlation_id_layer, permissive_cors, CORRELATION_ID_HEADER};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
