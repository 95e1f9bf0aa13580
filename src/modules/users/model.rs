//! User data models.
//!
//! Re-exported from the `yoga-models` crate. Only [`User`] leaves the API;
//! the password hash stays in [`UserCredentials`].

pub use yoga_models::users::*;
