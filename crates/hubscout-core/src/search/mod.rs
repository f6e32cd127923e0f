mod orchestrator;

pub use orchestrator::SearchOrchestrator;

use std::time::Duration;

/// How long input must pause before a search is issued.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(500);

/// Callbacks the presentation layer registers on the orchestrator. All of
/// them fire after the corresponding state change is visible through the
/// orchestrator's accessors.
pub trait SearchObserver: Send + Sync {
    fn results_updated(&self);
    fn loading_started(&self);
    fn loading_finished(&self);
    fn error_received(&self, message: &str);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SearchPhase {
    /// No query has been run.
    Idle,
    /// A query is pending the debounce interval.
    Debouncing,
    /// A request is in flight.
    Searching,
    Loaded,
    Failed,
}
