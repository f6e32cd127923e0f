pub mod error;
pub mod profile;
pub mod search;
pub mod user;

pub use error::{ApiError, ApiResult};
pub use profile::UserProfile;
pub use search::SearchResponse;
pub use user::User;
