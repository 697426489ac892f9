//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the YAML configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/relay.yaml";

/// Environment variable that overrides the configuration file path
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";

/// Prefix for environment overrides, e.g. `RELAY__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "RELAY";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on a whole inbound request, upstream call included
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// CORS configuration. An empty list or `*` allows any origin.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Hosted completion API configuration (OpenAI compatible)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Inline key; takes precedence over `api_key_env`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_llm_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_llm_timeout() -> u64 {
    60000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: None,
            api_key_env: default_llm_key_env(),
            timeout_ms: default_llm_timeout(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Video playlist configuration (YouTube Data API v3)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    #[serde(default = "default_youtube_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_playlist_id")]
    pub playlist_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_youtube_key_env")]
    pub api_key_env: String,
    /// Pages of 50 items fetched before giving up on a match
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_youtube_timeout")]
    pub timeout_ms: u64,
}

fn default_youtube_endpoint() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_playlist_id() -> String {
    "PLot-Xpze53ldVwtstag2TL4HQhAnC8ATf".to_string()
}

fn default_youtube_key_env() -> String {
    "YOUTUBE_API_KEY".to_string()
}

fn default_max_pages() -> u32 {
    4
}

fn default_youtube_timeout() -> u64 {
    15000
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_youtube_endpoint(),
            playlist_id: default_playlist_id(),
            api_key: None,
            api_key_env: default_youtube_key_env(),
            max_pages: default_max_pages(),
            timeout_ms: default_youtube_timeout(),
        }
    }
}

/// Prompt rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptConfig {
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,
}

fn default_max_description_chars() -> usize {
    4000
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_description_chars: default_max_description_chars(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Resolve a credential: inline value first, then the named environment variable.
/// Blank values count as unset.
pub fn resolve_credential(inline: Option<&str>, env_name: &str) -> Option<String> {
    inline
        .map(str::to_string)
        .or_else(|| std::env::var(env_name).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Settings {
    /// Load settings from the default file (or `RELAY_CONFIG`) and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_path(path)
    }

    /// Load settings from a specific configuration file path.
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Field defaults come from serde, so the builder only layers sources
        let mut config_builder = Config::builder();

        if path.exists() {
            config_builder = config_builder.add_source(File::from(path).format(FileFormat::Yaml));
        }

        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = config_builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(invalid("Server request_timeout_secs must be at least 1"));
        }
        if self.llm.endpoint.trim().is_empty() {
            return Err(invalid("LLM endpoint cannot be empty"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(invalid("LLM model cannot be empty"));
        }
        if self.youtube.endpoint.trim().is_empty() {
            return Err(invalid("YouTube endpoint cannot be empty"));
        }
        if self.youtube.playlist_id.trim().is_empty() {
            return Err(invalid("YouTube playlist id cannot be empty"));
        }
        if self.youtube.max_pages == 0 {
            return Err(invalid("YouTube max_pages must be at least 1"));
        }
        if self.prompt.max_description_chars == 0 {
            return Err(invalid("Prompt max_description_chars must be at least 1"));
        }

        Ok(())
    }

}

fn invalid(message: &str) -> AppError {
    AppError::Config(config::ConfigError::Message(message.to_string()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            llm: LlmConfig::default(),
            youtube: YouTubeConfig::default(),
            prompt: PromptConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
