//! Video details lookup and normalization.
//!
//! [`DetailFetcher`] runs the whole request path: identifier extraction,
//! one provider lookup, and mapping of the first returned item into
//! [`VideoDetails`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::duration::format_duration;
use crate::error::{DetailsError, Result};
use crate::provider::{VideoItem, VideoProvider};
use crate::video_id::{extract_video_id, VideoId};

/// Thumbnail resolution copied into the output.
const THUMBNAIL_RESOLUTION: &str = "medium";

/// Length of the `YYYY-MM-DD` prefix of an ISO 8601 timestamp.
const DATE_PREFIX_LEN: usize = 10;

/// Normalized video details returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub description: String,
    /// Calendar date only, `YYYY-MM-DD`.
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
    /// `HH:MM:SS`, hours may exceed two digits.
    pub duration_formatted: String,
    pub thumbnail_url: String,
}

/// Looks up videos through a [`VideoProvider`] and normalizes the result.
#[derive(Clone)]
pub struct DetailFetcher {
    provider: Arc<dyn VideoProvider>,
}

impl DetailFetcher {
    pub fn new(provider: Arc<dyn VideoProvider>) -> Self {
        Self { provider }
    }

    /// Extract the identifier from `url` and fetch its details.
    ///
    /// No provider call is made when the URL carries no identifier.
    pub async fn fetch_url(&self, url: &str) -> Result<VideoDetails> {
        let id = extract_video_id(url).ok_or(DetailsError::InvalidUrl)?;
        self.fetch(&id).await
    }

    /// Fetch and normalize details for one identifier.
    #[instrument(skip_all, fields(video_id = %id, provider = self.provider.name()))]
    pub async fn fetch(&self, id: &VideoId) -> Result<VideoDetails> {
        let response = self.provider.list_videos(id).await?;
        debug!(items = response.items.len(), "Provider lookup finished");

        let item = response
            .items
            .into_iter()
            .next()
            .ok_or(DetailsError::NotFound)?;

        map_item(id, item)
    }
}

impl std::fmt::Debug for DetailFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailFetcher")
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Map one raw provider item into [`VideoDetails`].
///
/// The publish date is the leading ten characters of the provider timestamp;
/// no calendar parsing takes place.
pub fn map_item(id: &VideoId, item: VideoItem) -> Result<VideoDetails> {
    let VideoItem {
        snippet,
        content_details,
    } = item;

    let duration_formatted = format_duration(&content_details.duration)?;

    let thumbnail_url = snippet
        .thumbnails
        .get(THUMBNAIL_RESOLUTION)
        .map(|t| t.url.clone())
        .ok_or_else(|| {
            DetailsError::Upstream(format!("missing '{THUMBNAIL_RESOLUTION}' thumbnail"))
        })?;

    Ok(VideoDetails {
        title: snippet.title,
        description: snippet.description,
        published_at: snippet.published_at.chars().take(DATE_PREFIX_LEN).collect(),
        video_id: id.to_string(),
        duration_formatted,
        thumbnail_url,
    })
}
