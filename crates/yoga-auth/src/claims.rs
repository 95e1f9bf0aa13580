use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// - `sub`: user id (decimal string)
/// - `email`: user's email, also the login username
/// - `admin`: whether the user is a studio administrator
/// - `exp` / `iat`: expiry and issue timestamps (Unix seconds)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub admin: bool,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// Numeric user id carried in `sub`, if well-formed.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
