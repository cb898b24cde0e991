//! Blocking client for the AnchorMarks REST API.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::bookmark::Bookmark;
use crate::settings::Settings;

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);
pub const CLICK_TIMEOUT: Duration = Duration::from_secs(2);
pub const CREATE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The AnchorMarks operations the plugin needs. Each call receives the
/// settings it should use instead of holding on to a copy.
pub trait BookmarkApi {
    /// `GET /api/quick-search`. `term = None` asks for the top bookmarks.
    fn quick_search(
        &self,
        settings: &Settings,
        term: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Bookmark>, ApiError>;

    /// `POST /api/bookmarks/<id>/click`
    fn track_click(&self, settings: &Settings, id: &str) -> Result<(), ApiError>;

    /// `POST /api/bookmarks`
    fn add_bookmark(&self, settings: &Settings, url: &str) -> Result<Bookmark, ApiError>;
}

#[derive(Serialize)]
struct NewBookmark<'a> {
    url: &'a str,
}

pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("anchormarks-flow/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn endpoint(settings: &Settings, path: &str) -> String {
        format!("{}/api{path}", settings.base_url())
    }

    fn authorized(
        &self,
        settings: &Settings,
        builder: RequestBuilder,
        timeout: Duration,
    ) -> Result<RequestBuilder, ApiError> {
        if !settings.is_configured() {
            return Err(ApiError::MissingApiKey);
        }
        Ok(builder
            .header(API_KEY_HEADER, settings.api_key.as_str())
            .timeout(timeout))
    }

    /// Send the request and decode a JSON body when `accept` likes the status.
    fn fetch<T: DeserializeOwned>(
        request: RequestBuilder,
        accept: fn(StatusCode) -> bool,
    ) -> Result<T, ApiError> {
        let resp = request.send()?;
        let status = resp.status();
        if !accept(status) {
            return Err(ApiError::Status(status));
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl BookmarkApi for ApiClient {
    fn quick_search(
        &self,
        settings: &Settings,
        term: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Bookmark>, ApiError> {
        let url = Self::endpoint(settings, "/quick-search");
        let mut query: Vec<(&str, String)> = Vec::with_capacity(2);
        if let Some(term) = term {
            query.push(("q", term.to_string()));
        }
        query.push(("limit", limit.to_string()));

        tracing::debug!(?term, limit, "quick-search");
        let request = self.authorized(settings, self.client.get(url).query(&query), QUERY_TIMEOUT)?;
        Self::fetch(request, |status| status == StatusCode::OK)
    }

    fn track_click(&self, settings: &Settings, id: &str) -> Result<(), ApiError> {
        let url = Self::endpoint(settings, &format!("/bookmarks/{id}/click"));
        let resp = self
            .authorized(settings, self.client.post(url), CLICK_TIMEOUT)?
            .send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }

    fn add_bookmark(&self, settings: &Settings, url: &str) -> Result<Bookmark, ApiError> {
        let endpoint = Self::endpoint(settings, "/bookmarks");
        let request = self.authorized(
            settings,
            self.client.post(endpoint).json(&NewBookmark { url }),
            CREATE_TIMEOUT,
        )?;
        // 201 Created is as good as 200 here.
        Self::fetch(request, |status| status.is_success())
    }
}
