//! Video identifier extraction from free-form YouTube links.
//!
//! Two link shapes are recognized:
//!
//! - query form: `https://www.youtube.com/watch?v=<id>&t=30s`
//! - short-link form: `https://youtu.be/<id>?si=...`
//!
//! The identifier is the maximal run of word characters and hyphens right
//! after the `v=` or `youtu.be/` marker. The earliest marker in the string wins.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|youtu\.be/)([\w-]+)").expect("video id pattern is valid")
});

/// Opaque identifier of one video in the provider's catalog.
///
/// Only obtainable through [`extract_video_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pull the video identifier out of `url`.
///
/// Returns `None` when neither marker is present or nothing identifier-like
/// follows it. Never fails on malformed input.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}
