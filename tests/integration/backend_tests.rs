//! Backend integration tests against mocked upstream APIs

use problem_assist_relay::backend::{
    CompletionBackend, OpenAICompatibleBackend, VideoPlaylist, YouTubePlaylistClient,
};
use problem_assist_relay::config::{LlmConfig, YouTubeConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn llm_config(endpoint: &str) -> LlmConfig {
    LlmConfig {
        endpoint: endpoint.to_string(),
        model: "test-model".to_string(),
        api_key_env: "RELAY_TEST_UNSET_LLM_KEY".to_string(),
        timeout_ms: 5000,
        ..Default::default()
    }
}

fn youtube_config(endpoint: &str, max_pages: u32) -> YouTubeConfig {
    YouTubeConfig {
        endpoint: endpoint.to_string(),
        playlist_id: "PLTEST".to_string(),
        api_key_env: "RELAY_TEST_UNSET_YT_KEY".to_string(),
        max_pages,
        timeout_ms: 5000,
        ..Default::default()
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn playlist_page(items: &[(&str, &str)], next: Option<&str>) -> serde_json::Value {
    let items: Vec<_> = items
        .iter()
        .map(|(id, title)| {
            json!({
                "snippet": {
                    "title": title,
                    "resourceId": { "kind": "youtube#video", "videoId": id }
                }
            })
        })
        .collect();

    match next {
        Some(token) => json!({ "items": items, "nextPageToken": token }),
        None => json!({ "items": items }),
    }
}

#[tokio::test]
async fn test_completion_returns_model_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  Use a hash map.  ")))
        .expect(1)
        .mount(&server)
        .await;

    let backend =
        OpenAICompatibleBackend::with_api_key(&llm_config(&server.uri()), Some("test-key".to_string())).unwrap();
    let text = backend.complete("Explain two sum").await.unwrap();

    assert_eq!(text, "Use a hash map.");
}

#[tokio::test]
async fn test_completion_sends_model_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;

    let backend =
        OpenAICompatibleBackend::with_api_key(&llm_config(&server.uri()), Some("test-key".to_string())).unwrap();
    backend.complete("the prompt").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "the prompt");
}

#[tokio::test]
async fn test_completion_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let backend =
        OpenAICompatibleBackend::with_api_key(&llm_config(&server.uri()), Some("test-key".to_string())).unwrap();
    let err = backend.complete("prompt").await.unwrap_err();

    assert_eq!(err.to_string(), "Empty response from model");
}

#[tokio::test]
async fn test_completion_upstream_error_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let backend =
        OpenAICompatibleBackend::with_api_key(&llm_config(&server.uri()), Some("test-key".to_string())).unwrap();
    let err = backend.complete("prompt").await.unwrap_err().to_string();

    assert!(err.starts_with("LLM API returned 429"), "{}", err);
    assert!(err.ends_with("quota exceeded"), "{}", err);
}

#[tokio::test]
async fn test_playlist_missing_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = YouTubePlaylistClient::with_api_key(&youtube_config(&server.uri(), 1), None).unwrap();
    let err = client.find_video(Some(1)).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "YouTube API key is not configured (set RELAY_TEST_UNSET_YT_KEY)"
    );
}

#[tokio::test]
async fn test_playlist_match_on_later_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "PLTEST"))
        .and(query_param("key", "yt-key"))
        .and(query_param("pageToken", "PAGE2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(
            &[("vid-21", "Merge Two Sorted Lists - Leetcode 21"), ("vid-2", "Add Two Numbers - Leetcode 2")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(
            &[("vid-1", "Two Sum - Leetcode 1"), ("vid-20", "Valid Parentheses - Leetcode 20")],
            Some("PAGE2"),
        )))
        .mount(&server)
        .await;

    let client =
        YouTubePlaylistClient::with_api_key(&youtube_config(&server.uri(), 3), Some("yt-key".to_string())).unwrap();

    let video = client.find_video(Some(2)).await.unwrap();
    assert_eq!(video.video_id, "vid-2");
}

#[tokio::test]
async fn test_playlist_falls_back_to_first_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(
            &[("vid-1", "Two Sum - Leetcode 1"), ("vid-20", "Valid Parentheses - Leetcode 20")],
            None,
        )))
        .mount(&server)
        .await;

    let client =
        YouTubePlaylistClient::with_api_key(&youtube_config(&server.uri(), 3), Some("yt-key".to_string())).unwrap();

    assert_eq!(client.find_video(Some(4242)).await.unwrap().video_id, "vid-1");
    assert_eq!(client.find_video(None).await.unwrap().video_id, "vid-1");
}

#[tokio::test]
async fn test_playlist_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(&[], None)))
        .mount(&server)
        .await;

    let client =
        YouTubePlaylistClient::with_api_key(&youtube_config(&server.uri(), 3), Some("yt-key".to_string())).unwrap();
    let err = client.find_video(Some(1)).await.unwrap_err();

    assert_eq!(err.to_string(), "No videos found in playlist");
}

#[tokio::test]
async fn test_playlist_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(403).set_body_string("keyInvalid"))
        .mount(&server)
        .await;

    let client =
        YouTubePlaylistClient::with_api_key(&youtube_config(&server.uri(), 1), Some("bad-key".to_string())).unwrap();
    let err = client.find_video(Some(1)).await.unwrap_err().to_string();

    assert!(err.starts_with("YouTube API returned 403"), "{}", err);
}

#[tokio::test]
async fn test_playlist_no_match_across_pages_uses_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("pageToken", "PAGE2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(
            &[("vid-3", "Longest Substring - Leetcode 3")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(
            &[("vid-1", "Two Sum - Leetcode 1")],
            Some("PAGE2"),
        )))
        .mount(&server)
        .await;

    let client =
        YouTubePlaylistClient::with_api_key(&youtube_config(&server.uri(), 5), Some("yt-key".to_string())).unwrap();

    assert_eq!(client.find_video(Some(999)).await.unwrap().video_id, "vid-1");
}
