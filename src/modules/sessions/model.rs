//! Session data models and DTOs.
//!
//! Re-exported from the `yoga-models` crate.

pub use yoga_models::sessions::*;
