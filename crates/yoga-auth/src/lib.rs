//! # Yoga Auth
//!
//! JWT access tokens for the yoga studio API.
//!
//! - [`claims`]: the claim set embedded in every access token
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use yoga_auth::{create_access_token, verify_token};
//! use yoga_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(1, "yoga@studio.com", true, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, "1");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{TOKEN_TYPE, create_access_token, verify_token};
