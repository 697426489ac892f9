//! Tutorial video lookup in a fixed YouTube playlist

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use crate::config::{settings::resolve_credential, YouTubeConfig};
use crate::error::{AppError, Result};

const PAGE_SIZE: u32 = 50;

/// A single video entry in the playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsPage {
    #[serde(default)]
    items: Vec<RawPlaylistItem>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlaylistItem {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

impl RawPlaylistItem {
    fn into_item(self) -> Option<PlaylistItem> {
        let snippet = self.snippet?;
        let video_id = snippet.resource_id?.video_id?;
        Some(PlaylistItem {
            video_id,
            title: snippet.title,
        })
    }
}

/// Number tokens in a video title in the accepted formats:
/// `#N`, `LeetCode N`, `LC N`, `Problem N`, `N.`, `N -`, `N:`, `N |`
fn title_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:#\s*|\bleetcode\s*#?\s*|\blc\s*#?\s*|\bproblem\s*#?\s*)(\d+)\b|\b(\d+)\s*[.:|\-]")
            .expect("title number pattern")
    })
}

/// Whether `title` mentions `number` in one of the accepted formats
pub fn title_mentions_number(title: &str, number: u32) -> bool {
    title_number_regex().captures_iter(title).any(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            == Some(number)
    })
}

/// First item whose title mentions `number`
pub fn matching_video(items: &[PlaylistItem], number: u32) -> Option<&PlaylistItem> {
    items.iter().find(|item| title_mentions_number(&item.title, number))
}

/// Pick the first item mentioning `number`, else the first item of the playlist.
pub fn select_video(items: &[PlaylistItem], number: Option<u32>) -> Option<&PlaylistItem> {
    number
        .and_then(|n| matching_video(items, n))
        .or_else(|| items.first())
}

/// Trait for playlist sources
#[async_trait]
pub trait VideoPlaylist: Send + Sync {
    /// Find a video for the given problem number, falling back to the first item
    async fn find_video(&self, number: Option<u32>) -> Result<PlaylistItem>;
}

/// YouTube Data API v3 playlist client
pub struct YouTubePlaylistClient {
    client: Client,
    endpoint: String,
    playlist_id: String,
    api_key: Option<String>,
    api_key_env: String,
    max_pages: u32,
}

impl YouTubePlaylistClient {
    pub fn new(config: &YouTubeConfig) -> Result<Self> {
        let api_key = resolve_credential(config.api_key.as_deref(), &config.api_key_env);
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &YouTubeConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            playlist_id: config.playlist_id.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            max_pages: config.max_pages,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_page(&self, key: &str, page_token: Option<&str>) -> Result<PlaylistItemsPage> {
        let url = format!("{}/playlistItems", self.endpoint);
        let max_results = PAGE_SIZE.to_string();

        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", self.playlist_id.as_str()),
            ("maxResults", max_results.as_str()),
            ("key", key),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        // Strip the URL from transport errors so the key never reaches a response
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "YouTube API returned {}: {}",
                status,
                body.trim()
            )));
        }

        response
            .json::<PlaylistItemsPage>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse YouTube response: {}", e.without_url())))
    }
}

#[async_trait]
impl VideoPlaylist for YouTubePlaylistClient {
    async fn find_video(&self, number: Option<u32>) -> Result<PlaylistItem> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            AppError::MissingCredential(format!(
                "YouTube API key is not configured (set {})",
                self.api_key_env
            ))
        })?;

        let mut collected: Vec<PlaylistItem> = Vec::new();
        let mut page_token: Option<String> = None;

        for page_index in 0..self.max_pages {
            let page = self.fetch_page(key, page_token.as_deref()).await?;
            let page_items: Vec<PlaylistItem> = page
                .items
                .into_iter()
                .filter_map(RawPlaylistItem::into_item)
                .collect();

            debug!(page = page_index, items = page_items.len(), "Fetched playlist page");

            // Stop paging once the selection can no longer change
            let settled = match number {
                Some(n) => matching_video(&page_items, n).is_some(),
                None => !page_items.is_empty(),
            };
            collected.extend(page_items);

            if settled {
                break;
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        select_video(&collected, number)
            .cloned()
            .ok_or(AppError::EmptyPlaylist)
    }
}
