//! HTTP route definitions

use crate::api::handlers;
use crate::api::models::*;
use crate::config::CorsConfig;
use crate::middleware::timeout::request_timeout;
use crate::problem::Language;
use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Problem Assist Relay API",
        description = "Explanations, pseudocode, solution code and tutorial videos for coding-practice problems.",
        license(name = "MIT"),
    ),
    paths(
        handlers::explanation,
        handlers::pseudocode,
        handlers::code,
        handlers::youtube,
        handlers::health_check,
    ),
    components(schemas(
        ProblemRequest,
        VideoRequest,
        ExplanationData,
        ExplanationResponse,
        PseudocodeData,
        PseudocodeResponse,
        CodeData,
        CodeResponse,
        VideoData,
        VideoResponse,
        ErrorResponse,
        HealthResponse,
        Language,
    )),
    tags(
        (name = "Artifacts", description = "LLM generated explanations, pseudocode and code"),
        (name = "Videos", description = "Tutorial video lookup"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

/// Build the CORS layer from configuration
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Create the main application router
pub fn create_router(state: Arc<crate::AppState>) -> Router {
    let cors = cors_layer(&state.settings.cors);
    let timeout = Duration::from_secs(state.settings.server.request_timeout_secs);

    let api_routes = Router::new()
        .route("/explanation", post(handlers::explanation))
        .route("/pseudocode", post(handlers::pseudocode))
        .route("/code", post(handlers::code))
        .route("/youtube", post(handlers::youtube));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(from_fn_with_state(timeout, request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
