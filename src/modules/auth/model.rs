//! Authentication DTOs, re-exported from the `yoga-models` crate.

pub use yoga_models::auth::*;
