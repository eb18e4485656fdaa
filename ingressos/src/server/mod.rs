//! HTTP server module for the ticket service.
//!
//! - Application state
//! - Router configuration
//! - Graceful shutdown handling

pub mod routes;
pub mod shutdown;
pub mod state;

pub use routes::build_router;
pub use shutdown::shutdown_signal;
pub use state::AppState;
