//! Video metadata providers.
//!
//! A [`VideoProvider`] performs one lookup-by-identifier against an external
//! catalog and returns the raw item list. Reshaping that list into
//! [`VideoDetails`](crate::details::VideoDetails) is the job of
//! [`DetailFetcher`](crate::details::DetailFetcher), so alternative providers
//! (or test fakes) only have to produce [`VideoListResponse`].
//!
//! # Architecture
//!
//! - [`VideoProvider`]: Async trait for one lookup call
//! - [`youtube::YouTubeDataApi`]: YouTube Data API v3 implementation
//! - [`VideoListResponse`]: Raw response shape (snippet + content-details facets)

pub mod youtube;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::video_id::VideoId;

pub use youtube::YouTubeDataApi;

/// Provider communication errors.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Never carries the request URL, whose query holds the API key.
    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// Raw `videos.list` response.
///
/// `items` is absent rather than empty for some unknown-id responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// One entry of the item list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub snippet: Snippet,
    pub content_details: ContentDetails,
}

/// Snippet facet: descriptive fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub description: String,
    /// ISO 8601 timestamp, e.g. `2020-01-02T10:00:00Z`.
    pub published_at: String,
    /// Keyed by resolution name (`default`, `medium`, `high`, ...).
    pub thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Content-details facet.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentDetails {
    /// ISO 8601 duration, e.g. `PT10M5S`.
    pub duration: String,
}

/// Source of raw video metadata.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Provider name (e.g., "youtube").
    fn name(&self) -> &'static str;

    /// Look up exactly one video, requesting the snippet and content-details facets.
    async fn list_videos(&self, id: &VideoId) -> Result<VideoListResponse, ProviderError>;
}
