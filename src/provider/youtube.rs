//! YouTube Data API v3 provider.
//!
//! Calls `GET {base}/videos?part=snippet,contentDetails&id=<id>&key=<key>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use ytdetails::provider::{VideoProvider, YouTubeDataApi};
//! use ytdetails::{extract_video_id, ApiClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = YouTubeDataApi::new(ApiClient::new()?, "my-api-key");
//! let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
//!
//! let response = api.list_videos(&id).await?;
//! println!("{} item(s)", response.items.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{ProviderError, VideoListResponse, VideoProvider};
use crate::http_client::ApiClient;
use crate::video_id::VideoId;

/// Public Data API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Facets requested for every lookup.
const PARTS: &str = "snippet,contentDetails";

/// YouTube Data API provider keyed by an API key.
pub struct YouTubeDataApi {
    client: ApiClient,
    base_url: String,
    api_key: String,
}

impl YouTubeDataApi {
    /// Provider against the public endpoint.
    pub fn new(client: ApiClient, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    /// Provider against an alternative endpoint (proxies, mocks).
    pub fn with_base_url(
        client: ApiClient,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn videos_url(&self, id: &VideoId) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &format!("{}/videos", self.base_url),
            &[("part", PARTS), ("id", id.as_str()), ("key", self.api_key.as_str())],
        )
    }
}

impl std::fmt::Debug for YouTubeDataApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeDataApi")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl VideoProvider for YouTubeDataApi {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn list_videos(&self, id: &VideoId) -> Result<VideoListResponse, ProviderError> {
        let url = self.videos_url(id)?;
        tracing::debug!(video_id = %id, "Fetching from YouTube Data API");

        let response = self.client.fetch(&url).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull the human-readable message out of a Google API error envelope.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
}

// ============================================================================
// Google API error envelope
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;
    use crate::video_id::extract_video_id;

    fn video_id() -> VideoId {
        extract_video_id("https://www.youtube.com/watch?v=abc123").unwrap()
    }

    #[test]
    fn builds_videos_url() {
        let api = YouTubeDataApi::new(ApiClient::new().unwrap(), "k&ey");
        let url = api.videos_url(&video_id()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?part=snippet%2CcontentDetails&id=abc123&key=k%26ey"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let api = YouTubeDataApi::with_base_url(ApiClient::new().unwrap(), "k", "http://h/v3/");
        assert!(api.videos_url(&video_id()).unwrap().as_str().starts_with("http://h/v3/videos?"));
    }

    #[test]
    fn debug_output_hides_key() {
        let api = YouTubeDataApi::new(ApiClient::new().unwrap(), "secret-key");
        let debug = format!("{api:?}");
        assert!(!debug.contains("secret-key"));
    }

    #[tokio::test]
    async fn lists_videos_with_expected_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet,contentDetails".into()),
                Matcher::UrlEncoded("id".into(), "abc123".into()),
                Matcher::UrlEncoded("key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items":[{"snippet":{"title":"T","description":"D","publishedAt":"2020-01-02T10:00:00Z","thumbnails":{"medium":{"url":"http://x/m.jpg"}}},"contentDetails":{"duration":"PT10M5S"}}]}"#,
            )
            .create_async()
            .await;

        let api = YouTubeDataApi::with_base_url(ApiClient::new().unwrap(), "test-key", server.url());
        let response = api.list_videos(&video_id()).await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].content_details.duration, "PT10M5S");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn surfaces_google_error_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(
                r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota.","errors":[{"reason":"quotaExceeded"}]}}"#,
            )
            .create_async()
            .await;

        let api = YouTubeDataApi::with_base_url(ApiClient::new().unwrap(), "k", server.url());
        let err = api.list_videos(&video_id()).await.unwrap_err();

        match err {
            ProviderError::Status { status, ref message } => {
                assert_eq!(status, 403);
                assert!(message.contains("exceeded your quota"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn falls_back_to_reason_phrase() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let api = YouTubeDataApi::with_base_url(ApiClient::new().unwrap(), "k", server.url());
        let err = api.list_videos(&video_id()).await.unwrap_err();
        assert_eq!(err.to_string(), "provider returned HTTP 502: Bad Gateway");
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let api = YouTubeDataApi::with_base_url(ApiClient::new().unwrap(), "k", server.url());
        let err = api.list_videos(&video_id()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
