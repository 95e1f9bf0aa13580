pub mod auth;
pub mod sessions;
pub mod teachers;
pub mod users;
