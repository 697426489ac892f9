//! Configuration module

pub mod settings;

pub use settings::{
    CorsConfig, LlmConfig, LoggingConfig, PromptConfig, ServerConfig, Settings, YouTubeConfig,
};
