use serde::Deserialize;

use crate::models::User;

/// Decoded body of `GET /search/users`. Item order is the API's order; no
/// deduplication happens anywhere downstream.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<User>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            incomplete_results: false,
            items: Vec::new(),
        }
    }
}
