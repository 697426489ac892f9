//! Problem Assist Relay
//!
//! A stateless HTTP relay that turns coding-practice problem references into
//! LLM-generated explanations, pseudocode and solution code, and looks up
//! tutorial videos in a fixed playlist.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod middleware;
pub mod problem;

pub use error::{AppError, Result};

use std::sync::Arc;

use backend::{CompletionBackend, OpenAICompatibleBackend, VideoPlaylist, YouTubePlaylistClient};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub llm: Arc<dyn CompletionBackend>,
    pub videos: Arc<dyn VideoPlaylist>,
}

impl AppState {
    /// Build the state with the HTTP clients described by `settings`
    pub fn from_settings(settings: config::Settings) -> Result<Self> {
        let llm = OpenAICompatibleBackend::new(&settings.llm)?;
        let videos = YouTubePlaylistClient::new(&settings.youtube)?;

        if !llm.has_api_key() {
            tracing::warn!(env = %settings.llm.api_key_env, "LLM API key is not configured");
        }
        if !videos.has_api_key() {
            tracing::warn!(env = %settings.youtube.api_key_env, "YouTube API key is not configured");
        }

        Ok(Self {
            settings: Arc::new(settings),
            llm: Arc::new(llm),
            videos: Arc::new(videos),
        })
    }
}
