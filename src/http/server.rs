//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address {0}: {1}")]
    Address(String, #[source] std::io::Error),

    #[error("Bind address {0} resolved to no addresses")]
    Unresolved(String),

    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),
}

/// Resolve `host` and `port` to a socket address.
///
/// Accepts IPv4 and IPv6 literals (`0.0.0.0`, `::`) as well as hostnames
/// such as `localhost`; the first resolved address wins.
pub async fn resolve_bind_addr(config: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    let display = format!("{}:{}", config.host, config.port);
    tokio::net::lookup_host((config.host.as_str(), config.port))
        .await
        .map_err(|e| ServerError::Address(display.clone(), e))?
        .next()
        .ok_or(ServerError::Unresolved(display))
}

/// Start the HTTP server based on configuration.
///
/// Installs the signal handlers and blocks until the server shuts down.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let addr = resolve_bind_addr(config).await?;

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone());

    serve(app, addr, handle).await
}

/// Serve `app` on `addr` until `handle` is shut down.
///
/// Binding port 0 picks an ephemeral port; `handle.listening()` reports it.
pub async fn serve(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
