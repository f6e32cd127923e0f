use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Closed set of failures the GitHub API surface can produce. No call is
/// retried; a single failed attempt is final for that call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("No data received")]
    NoData,
    #[error("Failed to parse the response")]
    Decoding(#[source] serde_json::Error),
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Rate limit exceeded. Please try again later")]
    RateLimitExceeded,
    #[error("Invalid response from the server")]
    InvalidResponse,
}
