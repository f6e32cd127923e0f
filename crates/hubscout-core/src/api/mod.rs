mod client;

pub use client::GitHubClient;

use std::future::Future;

use crate::models::{ApiResult, SearchResponse, UserProfile};

/// Seam between the orchestration layer and the GitHub REST surface.
/// Production code goes through [`GitHubClient`]; tests substitute scripted
/// implementations.
pub trait UserDirectory: Send + Sync {
    fn search_users(&self, query: &str)
    -> impl Future<Output = ApiResult<SearchResponse>> + Send;

    fn fetch_user_profile(
        &self,
        username: &str,
    ) -> impl Future<Output = ApiResult<UserProfile>> + Send;
}
