use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::UserDirectory;
use crate::models::{User, UserProfile};
use crate::observe::{ObserverRegistry, SubscriptionId};

pub trait ProfileObserver: Send + Sync {
    fn profile_loaded(&self);
    fn loading_started(&self);
    fn loading_finished(&self);
    fn error_received(&self, message: &str);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProfilePhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Fetches the extended profile for one user. Constructed per detail screen;
/// accessors prefer fetched profile fields and fall back to the originating
/// search-result `User` until the load completes (or if it never does).
pub struct ProfileLoader<D> {
    directory: Arc<D>,
    user: User,
    state: Mutex<ProfileState>,
    observers: ObserverRegistry<dyn ProfileObserver>,
}

struct ProfileState {
    phase: ProfilePhase,
    profile: Option<UserProfile>,
    error_message: Option<String>,
}

impl<D: UserDirectory> ProfileLoader<D> {
    pub fn new(directory: Arc<D>, user: User) -> Self {
        Self {
            directory,
            user,
            state: Mutex::new(ProfileState {
                phase: ProfilePhase::Idle,
                profile: None,
                error_message: None,
            }),
            observers: ObserverRegistry::new(),
        }
    }

    pub fn subscribe(&self, observer: Arc<dyn ProfileObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.unsubscribe(id);
    }

    pub async fn load(&self) {
        {
            let mut state = self.lock_state();
            state.phase = ProfilePhase::Loading;
            state.error_message = None;
        }
        self.observers
            .for_each(|observer| observer.loading_started());

        tracing::debug!(login = %self.user.login, "loading user profile");

        match self.directory.fetch_user_profile(&self.user.login).await {
            Ok(profile) => {
                {
                    let mut state = self.lock_state();
                    state.profile = Some(profile);
                    state.phase = ProfilePhase::Loaded;
                }
                self.observers
                    .for_each(|observer| observer.loading_finished());
                self.observers
                    .for_each(|observer| observer.profile_loaded());
            }
            Err(error) => {
                let message = error.to_string();
                tracing::error!(login = %self.user.login, %error, "profile load failed");
                {
                    let mut state = self.lock_state();
                    state.error_message = Some(message.clone());
                    state.phase = ProfilePhase::Failed;
                }
                self.observers
                    .for_each(|observer| observer.loading_finished());
                self.observers
                    .for_each(|observer| observer.error_received(&message));
            }
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.lock_state().profile.clone()
    }

    pub fn phase(&self) -> ProfilePhase {
        self.lock_state().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == ProfilePhase::Loading
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock_state().error_message.clone()
    }

    pub fn display_name(&self) -> String {
        self.lock_state()
            .profile
            .as_ref()
            .and_then(|profile| profile.name.clone())
            .unwrap_or_else(|| self.user.login.clone())
    }

    pub fn username(&self) -> String {
        self.lock_state()
            .profile
            .as_ref()
            .map(|profile| profile.login.clone())
            .unwrap_or_else(|| self.user.login.clone())
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.lock_state()
            .profile
            .as_ref()
            .and_then(|profile| profile.avatar_url.clone())
            .or_else(|| self.user.avatar_url.clone())
    }

    pub fn profile_url(&self) -> Option<String> {
        self.lock_state()
            .profile
            .as_ref()
            .and_then(|profile| profile.html_url.clone())
            .or_else(|| self.user.html_url.clone())
    }

    pub fn repository_count(&self) -> u64 {
        self.lock_state()
            .profile
            .as_ref()
            .map(|profile| profile.public_repos)
            .unwrap_or(0)
    }

    pub fn followers_count(&self) -> u64 {
        self.lock_state()
            .profile
            .as_ref()
            .map(|profile| profile.followers)
            .unwrap_or(0)
    }

    pub fn following_count(&self) -> u64 {
        self.lock_state()
            .profile
            .as_ref()
            .map(|profile| profile.following)
            .unwrap_or(0)
    }

    pub fn bio(&self) -> Option<String> {
        self.lock_state()
            .profile
            .as_ref()
            .and_then(|profile| profile.bio.clone())
    }

    pub fn location(&self) -> Option<String> {
        self.lock_state()
            .profile
            .as_ref()
            .and_then(|profile| profile.location.clone())
    }

    pub fn company(&self) -> Option<String> {
        self.lock_state()
            .profile
            .as_ref()
            .and_then(|profile| profile.company.clone())
    }

    fn lock_state(&self) -> MutexGuard<'_, ProfileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
