use std::hash::{Hash, Hasher};

use serde::Deserialize;

/// A user row from the search endpoint. Identity is the numeric GitHub id;
/// every other field is presentation data and takes no part in equality.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
}

impl User {
    pub fn new(id: u64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            avatar_url: None,
            html_url: None,
            user_type: None,
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
