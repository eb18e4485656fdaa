//! Ticket service HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Defaults to 127.0.0.1:5000
//! cargo run --bin ingressos
//!
//! # Docs at http://localhost:5000/apidocs
//! HOST=0.0.0.0 PORT=8080 cargo run --bin ingressos
//! ```

use ingressos::{build_router, metrics::register_metrics, server::shutdown_signal, AppState, Config};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ingressos=info,ingressos_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ticket service");

    let config = Config::from_env()?;
    info!(
        bind = %config.server.bind_address(),
        qr_version = config.qr.version,
        qr_error_correction = ?config.qr.error_correction,
        qr_box_size = config.qr.box_size,
        qr_border = config.qr.border,
        "Configuration loaded"
    );

    let prometheus = PrometheusBuilder::new().install_recorder()?;
    register_metrics();

    let app = build_router(AppState::new(&config, prometheus));

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
