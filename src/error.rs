//! Application error type and HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the relay
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    MissingCredential(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Empty response from model")]
    EmptyCompletion,

    #[error("No videos found in playlist")]
    EmptyPlaylist,

    #[error("{0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!(error = %message, "Request failed");

        // Every failure is a 500 with the raw message
        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
