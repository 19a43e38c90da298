//! Dockerization: a minimal HTTP liveness service.
//!
//! Serves `GET /health` with `{"status": "up"}`, optionally extended with a
//! `key` field read from a configured key provider on every request.

pub mod config;
pub mod error;
pub mod http;
pub mod key;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
