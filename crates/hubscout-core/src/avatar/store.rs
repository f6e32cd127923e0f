use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use crate::avatar::AvatarImage;

pub const DEFAULT_MAX_ENTRIES: usize = 100;
pub const DEFAULT_MAX_TOTAL_BYTES: usize = 50 * 1024 * 1024;

/// Bounded in-memory avatar cache keyed by the exact URL string (no
/// normalization). Entries are evicted least-recently-used once either the
/// entry count or the total byte budget is exceeded. Internally synchronized;
/// concurrent loads share one store.
pub struct AvatarStore {
    state: Mutex<StoreState>,
    max_total_bytes: usize,
}

struct StoreState {
    entries: LruCache<String, AvatarImage>,
    total_bytes: usize,
}

impl AvatarStore {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_TOTAL_BYTES)
    }

    pub fn with_limits(max_entries: usize, max_total_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(StoreState {
                entries: LruCache::new(capacity),
                total_bytes: 0,
            }),
            max_total_bytes,
        }
    }

    /// Returns the cached image and marks the entry as recently used.
    pub fn get(&self, url: &str) -> Option<AvatarImage> {
        let mut state = self.lock_state();
        state.entries.get(url).cloned()
    }

    pub fn insert(&self, url: String, image: AvatarImage) {
        let cost = image.len();
        let mut state = self.lock_state();

        state.total_bytes += cost;
        if let Some((_, displaced)) = state.entries.push(url, image) {
            // Either the LRU entry pushed out by the capacity limit or the
            // previous value under the same key.
            state.total_bytes = state.total_bytes.saturating_sub(displaced.len());
        }

        while state.total_bytes > self.max_total_bytes {
            let Some((_, evicted)) = state.entries.pop_lru() else {
                break;
            };
            state.total_bytes = state.total_bytes.saturating_sub(evicted.len());
        }
    }

    pub fn len(&self) -> usize {
        self.lock_state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_bytes(&self) -> usize {
        self.lock_state().total_bytes
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AvatarStore {
    fn default() -> Self {
        Self::new()
    }
}
