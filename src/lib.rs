//! `ytdetails` - YouTube link to normalized video details
//!
//! # Features
//!
//! - **Identifier extraction**: `watch?v=` and `youtu.be/` links
//! - **Duration normalization**: ISO 8601 designators to `HH:MM:SS`
//! - **Provider lookup**: YouTube Data API v3 behind the [`VideoProvider`] trait
//! - **HTTP service**: `POST /extract_details` returning JSON
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ytdetails::{ApiClient, DetailFetcher, YouTubeDataApi};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = YouTubeDataApi::new(ApiClient::new()?, "my-api-key");
//!     let fetcher = DetailFetcher::new(Arc::new(provider));
//!     let details = fetcher.fetch_url("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("{} ({})", details.title, details.duration_formatted);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod details;
pub mod duration;
pub mod error;
pub mod http_client;
pub mod provider;
pub mod server;
pub mod video_id;

pub use config::Config;
pub use details::{map_item, DetailFetcher, VideoDetails};
pub use duration::{format_clock, format_duration, parse_duration, DurationError};
pub use error::DetailsError;
pub use http_client::ApiClient;
pub use provider::{ProviderError, VideoListResponse, VideoProvider, YouTubeDataApi};
pub use server::{router, AppState};
pub use video_id::{extract_video_id, VideoId};

/// Version of ytdetails
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
