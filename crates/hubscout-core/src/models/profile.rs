use serde::Deserialize;

/// Extended record from `GET /users/{username}`. Never merged into [`User`];
/// the profile loader exposes fallback accessors instead.
///
/// [`User`]: crate::models::User
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
