use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::key::KeyError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Key provider error: {0}")]
    Key(#[from] KeyError),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Key(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // The cause stays in the logs; clients only see the reason phrase
        if status.is_server_error() {
            tracing::error!("Internal error: {:?}", self);
        }

        let body = ErrorBody {
            detail: status.canonical_reason().unwrap_or("Error"),
        };

        (status, Json(body)).into_response()
    }
}
