use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by `subscribe`; pass it back to `unsubscribe` on teardown.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

/// Owned observer list shared by the search orchestrator and profile loader.
/// The registry holds strong references; callers unregister explicitly when
/// the presentation side goes away.
pub(crate) struct ObserverRegistry<T: ?Sized> {
    state: Mutex<RegistryState<T>>,
}

struct RegistryState<T: ?Sized> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Arc<T>)>,
}

impl<T: ?Sized> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                next_id: 0,
                observers: Vec::new(),
            }),
        }
    }

    pub fn subscribe(&self, observer: Arc<T>) -> SubscriptionId {
        let mut state = self.lock_state();
        let id = SubscriptionId(state.next_id);
        state.next_id = state.next_id.saturating_add(1);
        state.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut state = self.lock_state();
        state.observers.retain(|(existing, _)| *existing != id);
    }

    /// Notifies every current subscriber. The list is snapshotted first so a
    /// callback may re-enter `subscribe`/`unsubscribe` without deadlocking.
    pub fn for_each(&self, mut notify: impl FnMut(&T)) {
        let observers: Vec<Arc<T>> = {
            let state = self.lock_state();
            state
                .observers
                .iter()
                .map(|(_, observer)| observer.clone())
                .collect()
        };
        for observer in &observers {
            notify(observer.as_ref());
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RegistryState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
