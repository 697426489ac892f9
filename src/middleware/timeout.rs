//! Request timeout that answers with the error envelope

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::warn;

use crate::error::AppError;

/// Run the rest of the stack under `limit`; on expiry respond with [`AppError::Timeout`].
pub async fn request_timeout(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(path = %path, limit_secs = limit.as_secs(), "Request timed out");
            AppError::Timeout(limit.as_secs()).into_response()
        }
    }
}
