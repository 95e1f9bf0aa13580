//! Authentication DTOs.
//!
//! Field names follow the web client's camelCase convention.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

pub use yoga_auth::Claims;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "yoga@studio.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "test!1234")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 50, message = "email must be at most 50 characters")
    )]
    pub email: String,
    #[validate(length(min = 3, max = 20, message = "firstName must be 3 to 20 characters"))]
    pub first_name: String,
    #[validate(length(min = 3, max = 20, message = "lastName must be 3 to 20 characters"))]
    pub last_name: String,
    #[validate(length(min = 6, max = 40, message = "password must be 6 to 40 characters"))]
    pub password: String,
}

/// Returned on successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInformation {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
