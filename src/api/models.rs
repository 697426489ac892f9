//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::problem::Language;

/// Problem reference accepted by the artifact endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRequest {
    /// Problem slug, e.g. `two-sum`. Derived from `url` when absent.
    #[serde(default)]
    pub problem_slug: Option<String>,

    /// Problem title, e.g. `1. Two Sum`
    #[serde(default)]
    pub title: Option<String>,

    /// Problem page URL
    #[serde(default)]
    pub url: Option<String>,

    /// Problem statement; truncated before prompting
    #[serde(default)]
    pub problem_description: Option<String>,

    /// Solution language for `/api/code`: `cpp`, `java` or `python` (default `cpp`)
    #[serde(default)]
    pub language: Option<String>,
}

/// Tutorial video lookup request
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub problem_slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ExplanationData {
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PseudocodeData {
    pub pseudocode: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CodeData {
    pub code: String,
    pub language: Language,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ExplanationResponse {
    pub success: bool,
    pub data: ExplanationData,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PseudocodeResponse {
    pub success: bool,
    pub data: PseudocodeData,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CodeResponse {
    pub success: bool,
    pub data: CodeData,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VideoResponse {
    pub success: bool,
    pub data: VideoData,
}

/// Error envelope returned with HTTP 500
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
}
