//! Outbound HTTP client for provider calls.
//!
//! Features:
//! - Connection pooling with keep-alive
//! - TLS 1.3 via rustls
//! - Gzip decompression (auto-negotiated)
//! - Explicit connect and overall request timeouts

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, info, instrument};
use url::Url;

/// Default TCP/TLS connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default end-to-end request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client shared by every provider request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a client with the default timeouts.
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(connect_timeout: Duration, request_timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            // Keep connections alive for reuse across requests
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .gzip(true)
            .user_agent(concat!("ytdetails/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// Issue a GET request.
    ///
    /// Only host and path are recorded in the span; the query string carries
    /// the API key.
    #[instrument(skip_all, fields(host = url.host_str().unwrap_or_default(), path = url.path()))]
    pub async fn fetch(&self, url: &Url) -> reqwest::Result<Response> {
        debug!("Sending request");
        let response = self.client.get(url.clone()).send().await?;

        info!(
            status = %response.status(),
            version = ?response.version(),
            "Response received"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Server;

    use super::*;

    #[tokio::test]
    async fn fetch_returns_response_for_any_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .with_status(503)
            .with_body("down")
            .create_async()
            .await;

        let client = ApiClient::new().unwrap();
        let url = Url::parse(&format!("{}/ping", server.url())).unwrap();
        let response = client.fetch(&url).await.unwrap();

        assert_eq!(response.status().as_u16(), 503);
        assert_eq!(response.text().await.unwrap(), "down");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sends_crate_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", mockito::Matcher::Regex("^ytdetails/".into()))
            .with_status(200)
            .create_async()
            .await;

        let client = ApiClient::new().unwrap();
        let url = Url::parse(&server.url()).unwrap();
        client.fetch(&url).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_host_fails_within_timeout() {
        let client =
            ApiClient::with_timeouts(Duration::from_millis(200), Duration::from_millis(200)).unwrap();
        let url = Url::parse("http://10.255.255.1:81/").unwrap();
        let err = client.fetch(&url).await.unwrap_err();
        assert!(err.is_timeout() || err.is_connect());
    }
}
