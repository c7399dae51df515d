//! Service configuration.
//!
//! Loaded once at startup from, in increasing precedence:
//!
//! 1. built-in defaults
//! 2. `~/.config/ytdetails/config.toml` (or an explicit `--config` file)
//! 3. environment variables (a `.env` file is honoured by the binary)
//!
//! CLI flags are applied on top by the binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::http_client::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use crate::provider::youtube::DEFAULT_BASE_URL;

/// Provider credential.
pub const ENV_API_KEY: &str = "YOUTUBE_API_KEY";
pub const ENV_BIND: &str = "YTDETAILS_BIND";
pub const ENV_API_BASE_URL: &str = "YTDETAILS_API_BASE_URL";
pub const ENV_CONNECT_TIMEOUT: &str = "YTDETAILS_CONNECT_TIMEOUT";
pub const ENV_TIMEOUT: &str = "YTDETAILS_TIMEOUT";

const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);

/// Resolved configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Provider API key; `None` keeps the server up but rejects every lookup.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub bind: SocketAddr,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

/// On-disk representation; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_key: Option<String>,
    api_base_url: Option<String>,
    bind: Option<SocketAddr>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            bind: SocketAddr::from(DEFAULT_BIND),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load from the config file and the process environment.
    ///
    /// `path` must exist when given; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => read_file(path)?,
            None => {
                let path = config_path();
                if path.exists() {
                    read_file(&path)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let mut config = Self::default();
        config.apply_file(file)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<()> {
        if let Some(key) = file.api_key {
            self.api_key = Some(key);
        }
        if let Some(url) = file.api_base_url {
            self.api_base_url = url;
        }
        if let Some(bind) = file.bind {
            self.bind = bind;
        }
        if let Some(secs) = file.connect_timeout_secs {
            self.connect_timeout_secs = check_secs("connect_timeout_secs", secs)?;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout_secs = check_secs("request_timeout_secs", secs)?;
        }
        self.normalize_api_key();
        Ok(())
    }

    /// Overlay values from an environment lookup function.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind = bind
                .parse()
                .with_context(|| format!("invalid {ENV_BIND} value {bind:?}"))?;
        }
        if let Some(secs) = lookup(ENV_CONNECT_TIMEOUT) {
            self.connect_timeout_secs = parse_secs(ENV_CONNECT_TIMEOUT, &secs)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT) {
            self.request_timeout_secs = parse_secs(ENV_TIMEOUT, &secs)?;
        }
        self.normalize_api_key();
        Ok(())
    }

    // An empty key is treated as unset.
    fn normalize_api_key(&mut self) {
        if self.api_key.as_deref().is_some_and(str::is_empty) {
            self.api_key = None;
        }
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("bind", &self.bind)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn parse_secs(name: &str, value: &str) -> Result<u64> {
    let secs = value
        .trim()
        .parse()
        .with_context(|| format!("invalid {name} value {value:?}, expected whole seconds"))?;
    check_secs(name, secs)
}

fn check_secs(name: &str, secs: u64) -> Result<u64> {
    if secs == 0 {
        bail!("{name} must be at least 1 second");
    }
    Ok(secs)
}

fn read_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Return the path to the default config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytdetails")
        .join("config.toml")
}
