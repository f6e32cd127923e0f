use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::avatar::{AvatarImage, AvatarStore};
use crate::models::{ApiError, ApiResult};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("hubscout/", env!("CARGO_PKG_VERSION"));

/// Transport seam for avatar bytes; tests substitute scripted fetchers.
pub trait AvatarFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = ApiResult<Vec<u8>>> + Send;
}

pub struct HttpAvatarFetcher {
    http: reqwest::Client,
}

impl HttpAvatarFetcher {
    pub fn new() -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self { http })
    }
}

impl AvatarFetcher for HttpAvatarFetcher {
    async fn fetch(&self, url: &str) -> ApiResult<Vec<u8>> {
        let url = reqwest::Url::parse(url).map_err(|_| ApiError::InvalidUrl)?;
        let response = self.http.get(url).send().await.map_err(ApiError::Network)?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(ApiError::InvalidResponse);
        }
        let bytes = response.bytes().await.map_err(ApiError::Network)?;
        Ok(bytes.to_vec())
    }
}

/// Cache-fronted avatar loading. Failures are soft: any fetch or decode
/// problem yields `None` and the caller falls back to a placeholder.
pub struct AvatarLoader<F> {
    store: Arc<AvatarStore>,
    fetcher: Arc<F>,
}

impl<F> Clone for AvatarLoader<F> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<F: AvatarFetcher + 'static> AvatarLoader<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self::with_store(fetcher, Arc::new(AvatarStore::new()))
    }

    pub fn with_store(fetcher: Arc<F>, store: Arc<AvatarStore>) -> Self {
        Self { store, fetcher }
    }

    pub fn store(&self) -> &AvatarStore {
        &self.store
    }

    pub async fn load(&self, url: &str) -> Option<AvatarImage> {
        if let Some(cached) = self.store.get(url) {
            return Some(cached);
        }

        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::debug!(url = %url, %error, "avatar fetch failed");
                return None;
            }
        };

        let format = match image::guess_format(&bytes) {
            Ok(format) => format,
            Err(_) => {
                tracing::debug!(url = %url, "avatar payload is not a known image format");
                return None;
            }
        };
        if image::load_from_memory_with_format(&bytes, format).is_err() {
            tracing::debug!(url = %url, "avatar payload failed to decode");
            return None;
        }

        let avatar = AvatarImage::new(format, bytes);
        self.store.insert(url.to_string(), avatar.clone());
        Some(avatar)
    }

    /// Runs `load` on a spawned task and hands back a cancellable handle. A
    /// caller that loses interest (a reused list row, a dismissed screen)
    /// cancels its own load; the cache and loads issued by other callers are
    /// unaffected.
    pub fn spawn_load(&self, url: &str) -> AvatarLoadHandle {
        let loader = self.clone();
        let url = url.to_string();
        let join = tokio::spawn(async move { loader.load(&url).await });
        AvatarLoadHandle { join }
    }
}

pub struct AvatarLoadHandle {
    join: JoinHandle<Option<AvatarImage>>,
}

impl AvatarLoadHandle {
    pub fn cancel(&self) {
        self.join.abort();
    }

    /// Resolves to the loaded image, or `None` on failure or cancellation.
    pub async fn finish(self) -> Option<AvatarImage> {
        self.join.await.ok().flatten()
    }
}
