//! HTTP surface.
//!
//! | Method | Path                    | Response                                  |
//! |--------|-------------------------|-------------------------------------------|
//! | GET    | `/`                     | Front page (HTML)                         |
//! | GET    | `/static/js/script.js`  | Front page script                         |
//! | POST   | `/extract_details`      | [`VideoDetails`] or `{"error": "..."}`    |

use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::details::{DetailFetcher, VideoDetails};
use crate::error::DetailsError;
use crate::http_client::ApiClient;
use crate::provider::YouTubeDataApi;

const INDEX_HTML: &str = include_str!("../static/index.html");
const SCRIPT_JS: &str = include_str!("../static/js/script.js");

/// Shared, read-only request state.
///
/// `fetcher` is `None` when no API key was configured at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    fetcher: Option<Arc<DetailFetcher>>,
}

impl AppState {
    pub fn new(fetcher: Option<DetailFetcher>) -> Self {
        Self {
            fetcher: fetcher.map(Arc::new),
        }
    }

    /// Build the YouTube-backed state from configuration.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let Some(api_key) = config.api_key.as_deref() else {
            warn!("{} is not set; every lookup will fail", crate::config::ENV_API_KEY);
            return Ok(Self::new(None));
        };

        let client = ApiClient::with_timeouts(config.connect_timeout(), config.request_timeout())?;
        let provider = YouTubeDataApi::with_base_url(client, api_key, config.api_base_url.as_str());
        Ok(Self::new(Some(DetailFetcher::new(Arc::new(provider)))))
    }

    /// The fetcher, or [`DetailsError::MissingApiKey`].
    pub fn fetcher(&self) -> Result<&DetailFetcher, DetailsError> {
        self.fetcher.as_deref().ok_or(DetailsError::MissingApiKey)
    }
}

/// Request body of `POST /extract_details`.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/js/script.js", get(script))
        .route("/extract_details", post(extract_details))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` on the configured address until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config, state: AppState) -> std::io::Result<()> {
    let listener = match TcpListener::bind(config.bind).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {} - is another instance running?", config.bind, e);
            return Err(e);
        }
    };
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

async fn extract_details(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<VideoDetails>, DetailsError> {
    // The credential check comes before any look at the request.
    let fetcher = state.fetcher()?;
    let Json(request) = payload.map_err(|e| DetailsError::BadRequest(e.body_text()))?;

    let details = fetcher.fetch_url(&request.url).await?;
    Ok(Json(details))
}

impl DetailsError {
    /// HTTP status reported for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingApiKey | Self::Upstream(_) | Self::BadRequest(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InvalidUrl => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for DetailsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, "Error processing YouTube API: {message}");
        } else {
            warn!(%status, "{message}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    DetailsError::Upstream(detail).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down HTTP server...");
}
