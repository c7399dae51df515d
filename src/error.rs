//! Outcome kinds of a details request.
//!
//! The display strings are the client-facing messages; the HTTP status for
//! each kind is assigned in [`crate::server`].

use thiserror::Error;

use crate::duration::DurationError;
use crate::provider::ProviderError;

/// Details request errors
#[derive(Error, Debug)]
pub enum DetailsError {
    /// No provider credential was configured at startup.
    #[error("API Key not configured on the server.")]
    MissingApiKey,

    /// No video identifier could be extracted from the supplied URL.
    #[error("Invalid YouTube URL provided.")]
    InvalidUrl,

    /// The provider returned zero items (private, deleted or unknown video).
    #[error("Video not found or is private.")]
    NotFound,

    /// Provider communication or response mapping failed.
    #[error("An API error occurred: {0}")]
    Upstream(String),

    /// The request body could not be read as `{"url": "..."}`.
    #[error("An API error occurred: {0}")]
    BadRequest(String),
}

impl From<ProviderError> for DetailsError {
    fn from(err: ProviderError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<DurationError> for DetailsError {
    fn from(err: DurationError) -> Self {
        Self::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DetailsError>;
