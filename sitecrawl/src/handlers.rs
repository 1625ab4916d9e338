use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use sitecrawl_core::{CrawlOptions, CrawlSettings, ProxyRequest, SeedRequest, execute_crawl};
use sitecrawl_scanner::{Page, ScanError};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub settings: CrawlSettings,
}

/// Body of `POST /crawl`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlRequest {
    pub url: Option<String>,
    pub proxy: Option<ProxyRequest>,
}

impl CrawlRequest {
    pub fn into_seed_request(self) -> Result<SeedRequest, ApiError> {
        let url = self
            .url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingUrl)?;

        let proxy = self.proxy.and_then(ProxyRequest::into_config);
        Ok(SeedRequest::new(url).with_proxy(proxy))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Crawl(#[from] ScanError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Crawl(ScanError::InvalidUrl(_) | ScanError::InvalidProxy(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Crawl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Crawl request failed: {}", self);
        } else {
            debug!("Rejected crawl request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `POST /crawl`: crawl the requested site and return `{ url: page }` for every fetched page.
pub async fn post_crawl(
    State(state): State<AppState>,
    payload: Result<Json<CrawlRequest>, JsonRejection>,
) -> Result<Json<HashMap<String, Page>>, ApiError> {
    let Json(request) = payload?;
    let seed_request = request.into_seed_request()?;
    info!("POST /crawl called for {}", seed_request.seed_url);

    let options = CrawlOptions {
        settings: state.settings.clone(),
        show_progress_bars: false,
    };
    let result = execute_crawl(seed_request, options, None).await?;

    info!(
        "Crawl finished: {} pages, {} failures",
        result.stats.pages_fetched, result.stats.pages_failed
    );
    Ok(Json(result.into_pages()))
}
