//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: Bearer-token authentication
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the JWT and exposes its claims
//! 3. The handler runs only if verification succeeded; otherwise 401
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn list(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
//!     // only reached with a valid token
//! }
//! ```

pub mod auth;
