use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::api::UserDirectory;
use crate::models::User;
use crate::observe::{ObserverRegistry, SubscriptionId};
use crate::search::{DEBOUNCE_INTERVAL, SearchObserver, SearchPhase};

const EMPTY_STATE_PROMPT: &str = "Search for GitHub users to get started";
const EMPTY_STATE_NO_RESULTS: &str = "No users found\nTry searching for a different username";
const EMPTY_STATE_PROMPT_SYMBOL: &str = "magnifyingglass.circle";
const EMPTY_STATE_NO_RESULTS_SYMBOL: &str = "magnifyingglass";

/// Owns the current query, debounces raw input, and guarantees that at most
/// one search is authoritative at a time: every new query bumps a generation
/// counter and aborts the previous debounce timer or in-flight request, and a
/// superseded operation is discarded before it can touch state or notify
/// observers.
pub struct SearchOrchestrator<D> {
    inner: Arc<SearchInner<D>>,
}

impl<D> Clone for SearchOrchestrator<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct SearchInner<D> {
    directory: Arc<D>,
    debounce: Duration,
    state: Mutex<SearchState>,
    observers: ObserverRegistry<dyn SearchObserver>,
}

struct SearchState {
    phase: SearchPhase,
    users: Vec<User>,
    error_message: Option<String>,
    has_searched: bool,
    generation: u64,
    active: Option<AbortHandle>,
}

impl<D> SearchInner<D> {
    fn lock_state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<D: UserDirectory + 'static> SearchOrchestrator<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self::with_debounce(directory, DEBOUNCE_INTERVAL)
    }

    pub fn with_debounce(directory: Arc<D>, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                directory,
                debounce,
                state: Mutex::new(SearchState {
                    phase: SearchPhase::Idle,
                    users: Vec::new(),
                    error_message: None,
                    has_searched: false,
                    generation: 0,
                    active: None,
                }),
                observers: ObserverRegistry::new(),
            }),
        }
    }

    pub fn subscribe(&self, observer: Arc<dyn SearchObserver>) -> SubscriptionId {
        self.inner.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.observers.unsubscribe(id);
    }

    /// Accepts raw query input. A trimmed-empty query cancels outstanding
    /// work and resets synchronously; anything else supersedes the previous
    /// query and arms the debounce timer. Must be called from within a tokio
    /// runtime.
    pub fn set_query(&self, query: &str) {
        let trimmed = query.trim();

        let generation = {
            let mut state = self.inner.lock_state();
            state.generation += 1;
            if let Some(active) = state.active.take() {
                active.abort();
            }

            if trimmed.is_empty() {
                state.phase = SearchPhase::Idle;
                state.users.clear();
                state.error_message = None;
                state.has_searched = false;
                drop(state);
                self.inner
                    .observers
                    .for_each(|observer| observer.results_updated());
                return;
            }

            state.phase = SearchPhase::Debouncing;
            state.generation
        };

        tracing::debug!(query = %trimmed, generation, "query accepted, debouncing");

        let inner = self.inner.clone();
        let query = trimmed.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            run_search(inner, generation, query).await;
        });

        let mut state = self.inner.lock_state();
        if state.generation == generation {
            state.active = Some(handle.abort_handle());
        } else {
            // Already superseded while we were spawning.
            handle.abort();
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.inner.lock_state().users.clone()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock_state().users.len()
    }

    pub fn user_at(&self, index: usize) -> Option<User> {
        self.inner.lock_state().users.get(index).cloned()
    }

    pub fn phase(&self) -> SearchPhase {
        self.inner.lock_state().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == SearchPhase::Searching
    }

    pub fn has_searched(&self) -> bool {
        self.inner.lock_state().has_searched
    }

    pub fn error_message(&self) -> Option<String> {
        self.inner.lock_state().error_message.clone()
    }

    pub fn should_show_empty_state(&self) -> bool {
        let state = self.inner.lock_state();
        state.users.is_empty() && state.phase != SearchPhase::Searching
    }

    pub fn empty_state_message(&self) -> &'static str {
        if self.has_searched() {
            EMPTY_STATE_NO_RESULTS
        } else {
            EMPTY_STATE_PROMPT
        }
    }

    pub fn empty_state_symbol(&self) -> &'static str {
        if self.has_searched() {
            EMPTY_STATE_NO_RESULTS_SYMBOL
        } else {
            EMPTY_STATE_PROMPT_SYMBOL
        }
    }
}

async fn run_search<D: UserDirectory>(inner: Arc<SearchInner<D>>, generation: u64, query: String) {
    {
        let mut state = inner.lock_state();
        if state.generation != generation {
            return;
        }
        state.phase = SearchPhase::Searching;
        state.error_message = None;
        state.has_searched = true;
    }
    inner
        .observers
        .for_each(|observer| observer.loading_started());

    let result = inner.directory.search_users(&query).await;

    let mut state = inner.lock_state();
    if state.generation != generation {
        tracing::debug!(query = %query, generation, "search superseded, result discarded");
        return;
    }
    state.active = None;

    match result {
        Ok(response) => {
            tracing::debug!(query = %query, count = response.items.len(), "search succeeded");
            state.users = response.items;
            state.error_message = None;
            state.phase = SearchPhase::Loaded;
            drop(state);
            inner
                .observers
                .for_each(|observer| observer.loading_finished());
            inner
                .observers
                .for_each(|observer| observer.results_updated());
        }
        Err(error) => {
            let message = error.to_string();
            tracing::error!(query = %query, %error, "search failed");
            state.users.clear();
            state.error_message = Some(message.clone());
            state.phase = SearchPhase::Failed;
            drop(state);
            inner
                .observers
                .for_each(|observer| observer.loading_finished());
            inner
                .observers
                .for_each(|observer| observer.error_received(&message));
            inner
                .observers
                .for_each(|observer| observer.results_updated());
        }
    }
}
