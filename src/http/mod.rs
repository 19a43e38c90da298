//! HTTP server module.
//!
//! The server includes:
//! - Binding on the configured host and port (all interfaces by default)
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{resolve_bind_addr, serve, start_server, ServerError};
