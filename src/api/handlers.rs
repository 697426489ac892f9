//! HTTP request handlers

use crate::api::extract::AppJson;
use crate::api::models::{
    CodeData, CodeResponse, ErrorResponse, ExplanationData, ExplanationResponse, HealthResponse,
    ProblemRequest, PseudocodeData, PseudocodeResponse, VideoData, VideoRequest, VideoResponse,
};
use crate::error::Result;
use crate::problem::{
    problem_number,
    prompt::{self, Artifact},
    Language, Problem,
};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

/// Resolve the problem, render the prompt for `artifact` and forward it to the model
async fn generate(state: &AppState, request: &ProblemRequest, artifact: Artifact) -> Result<String> {
    let problem = Problem::resolve(
        request.problem_slug.as_deref(),
        request.title.as_deref(),
        request.url.as_deref(),
        request.problem_description.as_deref(),
        state.settings.prompt.max_description_chars,
    )?;

    info!(
        artifact = artifact.label(),
        problem = %problem.name,
        slug = problem.slug.as_deref().unwrap_or("-"),
        "Received generation request"
    );

    let prompt = prompt::render(&problem, artifact);
    let text = state.llm.complete(&prompt).await?;

    info!(
        artifact = artifact.label(),
        backend = state.llm.name(),
        response_len = text.len(),
        "Generation completed"
    );

    Ok(text)
}

/// Explain how to approach a problem
#[utoipa::path(
    post,
    path = "/api/explanation",
    tag = "Artifacts",
    request_body = ProblemRequest,
    responses(
        (status = 200, description = "Explanation generated", body = ExplanationResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse),
    )
)]
pub async fn explanation(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<ProblemRequest>,
) -> Result<Json<ExplanationResponse>> {
    let explanation = generate(&state, &request, Artifact::Explanation).await?;

    Ok(Json(ExplanationResponse {
        success: true,
        data: ExplanationData { explanation },
    }))
}

/// Produce language-agnostic pseudocode
#[utoipa::path(
    post,
    path = "/api/pseudocode",
    tag = "Artifacts",
    request_body = ProblemRequest,
    responses(
        (status = 200, description = "Pseudocode generated", body = PseudocodeResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse),
    )
)]
pub async fn pseudocode(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<ProblemRequest>,
) -> Result<Json<PseudocodeResponse>> {
    let pseudocode = generate(&state, &request, Artifact::Pseudocode).await?;

    Ok(Json(PseudocodeResponse {
        success: true,
        data: PseudocodeData { pseudocode },
    }))
}

/// Produce solution code in the requested language
#[utoipa::path(
    post,
    path = "/api/code",
    tag = "Artifacts",
    request_body = ProblemRequest,
    responses(
        (status = 200, description = "Code generated", body = CodeResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse),
    )
)]
pub async fn code(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<ProblemRequest>,
) -> Result<Json<CodeResponse>> {
    let language = Language::parse_or_default(request.language.as_deref());
    let raw = generate(&state, &request, Artifact::Code(language)).await?;

    Ok(Json(CodeResponse {
        success: true,
        data: CodeData {
            code: prompt::strip_code_fence(&raw),
            language,
        },
    }))
}

/// Find a tutorial video in the configured playlist
#[utoipa::path(
    post,
    path = "/api/youtube",
    tag = "Videos",
    request_body = VideoRequest,
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 500, description = "Lookup failed", body = ErrorResponse),
    )
)]
pub async fn youtube(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<VideoRequest>,
) -> Result<Json<VideoResponse>> {
    let number = request.title.as_deref().and_then(problem_number);

    info!(
        title = request.title.as_deref().unwrap_or("-"),
        slug = request.problem_slug.as_deref().unwrap_or("-"),
        number = ?number,
        "Received video lookup request"
    );

    let video = state.videos.find_video(number).await?;

    info!(video_id = %video.video_id, video_title = %video.title, "Video lookup completed");

    Ok(Json(VideoResponse {
        success: true,
        data: VideoData {
            video_id: video.video_id,
        },
    }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
