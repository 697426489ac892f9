//! JSON extractor whose rejections use the error envelope

use axum::{
    async_trait,
    body::{to_bytes, Body},
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Same ceiling as axum's default body limit
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// `axum::Json` with rejections mapped into [`AppError`].
/// Every request field is optional, so an empty body yields `T::default()`.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Failed to read request body: {}", e)))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(AppJson(T::default()));
        }

        let Json(value) = Json::<T>::from_request(Request::from_parts(parts, Body::from(bytes)), state).await?;
        Ok(AppJson(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}
