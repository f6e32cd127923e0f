pub mod api;
pub mod avatar;
pub mod models;
pub mod observe;
pub mod profile;
pub mod search;
