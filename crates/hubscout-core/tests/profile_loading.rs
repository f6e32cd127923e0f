use std::sync::{Arc, Mutex};

use hubscout_core::api::UserDirectory;
use hubscout_core::models::{ApiError, ApiResult, SearchResponse, User, UserProfile};
use hubscout_core::profile::{ProfileLoader, ProfileObserver, ProfilePhase};

enum ProfileScript {
    Success(UserProfile),
    RateLimited,
}

struct ScriptedDirectory {
    script: ProfileScript,
    requested: Mutex<Vec<String>>,
}

impl ScriptedDirectory {
    fn new(script: ProfileScript) -> Self {
        Self {
            script,
            requested: Mutex::new(Vec::new()),
        }
    }
}

impl UserDirectory for ScriptedDirectory {
    async fn search_users(&self, _query: &str) -> ApiResult<SearchResponse> {
        Ok(SearchResponse::empty())
    }

    async fn fetch_user_profile(&self, username: &str) -> ApiResult<UserProfile> {
        self.requested.lock().unwrap().push(username.to_string());
        match &self.script {
            ProfileScript::Success(profile) => Ok(profile.clone()),
            ProfileScript::RateLimited => Err(ApiError::RateLimitExceeded),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Started,
    Finished,
    Loaded,
    Error(String),
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl ProfileObserver for RecordingObserver {
    fn profile_loaded(&self) {
        self.events.lock().unwrap().push(Event::Loaded);
    }

    fn loading_started(&self) {
        self.events.lock().unwrap().push(Event::Started);
    }

    fn loading_finished(&self) {
        self.events.lock().unwrap().push(Event::Finished);
    }

    fn error_received(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Error(message.to_string()));
    }
}

fn test_user() -> User {
    User {
        id: 7,
        login: "testuser".to_string(),
        avatar_url: Some("https://example.com/avatar.jpg".to_string()),
        html_url: Some("https://github.com/testuser".to_string()),
        user_type: Some("User".to_string()),
    }
}

fn sample_profile() -> UserProfile {
    UserProfile {
        id: 7,
        login: "testuser".to_string(),
        name: Some("Test User".to_string()),
        avatar_url: Some("https://example.com/profile-avatar.jpg".to_string()),
        html_url: Some("https://github.com/testuser-profile".to_string()),
        user_type: Some("User".to_string()),
        bio: Some("Keeps the tests honest".to_string()),
        public_repos: 42,
        followers: 9000,
        following: 9,
        location: Some("San Francisco".to_string()),
        company: Some("GitHub".to_string()),
        blog: None,
        created_at: "2011-01-25T18:44:36Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[tokio::test]
async fn accessors_fall_back_to_the_search_user_before_loading() {
    let directory = Arc::new(ScriptedDirectory::new(ProfileScript::Success(
        sample_profile(),
    )));
    let loader = ProfileLoader::new(directory, test_user());

    assert_eq!(loader.phase(), ProfilePhase::Idle);
    assert!(loader.profile().is_none());
    assert!(!loader.is_loading());
    assert_eq!(loader.display_name(), "testuser");
    assert_eq!(loader.username(), "testuser");
    assert_eq!(
        loader.avatar_url().as_deref(),
        Some("https://example.com/avatar.jpg")
    );
    assert_eq!(
        loader.profile_url().as_deref(),
        Some("https://github.com/testuser")
    );
    assert_eq!(loader.repository_count(), 0);
    assert_eq!(loader.followers_count(), 0);
    assert_eq!(loader.following_count(), 0);
    assert!(loader.bio().is_none());
    assert!(loader.location().is_none());
    assert!(loader.company().is_none());
}

#[tokio::test]
async fn successful_load_prefers_profile_fields() {
    let directory = Arc::new(ScriptedDirectory::new(ProfileScript::Success(
        sample_profile(),
    )));
    let loader = ProfileLoader::new(directory.clone(), test_user());
    let observer = Arc::new(RecordingObserver::default());
    loader.subscribe(observer.clone());

    loader.load().await;

    assert_eq!(
        directory.requested.lock().unwrap().as_slice(),
        ["testuser".to_string()]
    );
    assert_eq!(loader.phase(), ProfilePhase::Loaded);
    assert_eq!(loader.display_name(), "Test User");
    assert_eq!(loader.repository_count(), 42);
    assert_eq!(loader.followers_count(), 9000);
    assert_eq!(loader.following_count(), 9);
    assert_eq!(
        loader.avatar_url().as_deref(),
        Some("https://example.com/profile-avatar.jpg")
    );
    assert_eq!(loader.bio().as_deref(), Some("Keeps the tests honest"));
    assert_eq!(loader.location().as_deref(), Some("San Francisco"));
    assert_eq!(loader.company().as_deref(), Some("GitHub"));
    assert_eq!(
        observer.events(),
        vec![Event::Started, Event::Finished, Event::Loaded]
    );
}

#[tokio::test]
async fn profile_gaps_fall_back_to_the_search_user() {
    let mut profile = sample_profile();
    profile.name = None;
    profile.avatar_url = None;
    profile.html_url = None;

    let directory = Arc::new(ScriptedDirectory::new(ProfileScript::Success(profile)));
    let loader = ProfileLoader::new(directory, test_user());
    loader.load().await;

    assert_eq!(loader.display_name(), "testuser");
    assert_eq!(
        loader.avatar_url().as_deref(),
        Some("https://example.com/avatar.jpg")
    );
    assert_eq!(
        loader.profile_url().as_deref(),
        Some("https://github.com/testuser")
    );
}

#[tokio::test]
async fn failed_load_keeps_fallbacks_and_reports_the_error() {
    let directory = Arc::new(ScriptedDirectory::new(ProfileScript::RateLimited));
    let loader = ProfileLoader::new(directory, test_user());
    let observer = Arc::new(RecordingObserver::default());
    loader.subscribe(observer.clone());

    loader.load().await;

    let message = "Rate limit exceeded. Please try again later".to_string();
    assert_eq!(loader.phase(), ProfilePhase::Failed);
    assert!(!loader.is_loading());
    assert_eq!(loader.error_message(), Some(message.clone()));
    assert!(loader.profile().is_none());
    assert_eq!(loader.display_name(), "testuser");
    assert_eq!(loader.repository_count(), 0);
    assert_eq!(
        observer.events(),
        vec![Event::Started, Event::Finished, Event::Error(message)]
    );
}

#[tokio::test]
async fn reload_after_failure_can_succeed() {
    // User-initiated retry is the only recovery path: a fresh load against a
    // now-working directory clears the failed state.
    let failing = Arc::new(ScriptedDirectory::new(ProfileScript::RateLimited));
    let loader = ProfileLoader::new(failing, test_user());
    loader.load().await;
    assert_eq!(loader.phase(), ProfilePhase::Failed);

    let working = Arc::new(ScriptedDirectory::new(ProfileScript::Success(
        sample_profile(),
    )));
    let loader = ProfileLoader::new(working, test_user());
    loader.load().await;

    assert_eq!(loader.phase(), ProfilePhase::Loaded);
    assert!(loader.error_message().is_none());
    assert_eq!(loader.repository_count(), 42);
}
