//! Application configuration, loaded from the environment.

pub use yoga_config::{CorsConfig, JwtConfig, ServerConfig};
