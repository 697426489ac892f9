//! Backend module - clients for the external completion and video APIs

pub mod playlist;
pub mod text_backend;

pub use playlist::{matching_video, select_video, PlaylistItem, VideoPlaylist, YouTubePlaylistClient};
pub use text_backend::{CompletionBackend, OpenAICompatibleBackend};
