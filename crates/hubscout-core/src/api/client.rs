use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::api::UserDirectory;
use crate::models::{ApiError, ApiResult, SearchResponse, UserProfile};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("hubscout/", env!("CARGO_PKG_VERSION"));
const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const TOTAL_TIMEOUT: Duration = Duration::from_secs(20);

/// Stateless handle on the GitHub REST API. Cheap to clone; construct once at
/// process start and hand to every consumer.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new() -> ApiResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|_| ApiError::InvalidUrl)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(TOTAL_TIMEOUT)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { http, base_url })
    }

    fn search_url(&self, query: &str) -> ApiResult<Url> {
        let mut url = self
            .base_url
            .join("search/users")
            .map_err(|_| ApiError::InvalidUrl)?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    fn profile_url(&self, username: &str) -> ApiResult<Url> {
        self.base_url
            .join(&format!("users/{username}"))
            .map_err(|_| ApiError::InvalidUrl)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        tracing::debug!(%url, "issuing GitHub API request");

        let response = self.http.get(url).send().await.map_err(ApiError::Network)?;
        let status = response.status();
        tracing::debug!(%status, "GitHub API response received");

        if status == StatusCode::FORBIDDEN {
            return Err(ApiError::RateLimitExceeded);
        }
        if status != StatusCode::OK {
            return Err(ApiError::InvalidResponse);
        }

        let body = response.bytes().await.map_err(ApiError::Network)?;
        if body.is_empty() {
            return Err(ApiError::NoData);
        }

        serde_json::from_slice(&body).map_err(ApiError::Decoding)
    }
}

impl UserDirectory for GitHubClient {
    async fn search_users(&self, query: &str) -> ApiResult<SearchResponse> {
        // Empty queries never touch the network.
        if query.is_empty() {
            return Ok(SearchResponse::empty());
        }

        let url = self.search_url(query)?;
        let response: SearchResponse = self.get_json(url).await?;
        tracing::debug!(count = response.items.len(), "search response decoded");
        Ok(response)
    }

    async fn fetch_user_profile(&self, username: &str) -> ApiResult<UserProfile> {
        let url = self.profile_url(username)?;
        self.get_json(url).await
    }
}
