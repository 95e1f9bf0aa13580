//! Yoga session models and DTOs.
//!
//! A session is a scheduled class with an optional teacher and a set of
//! participating users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};
use yoga_core::serde::deserialize_flexible_datetime;

use crate::ids::{SessionId, TeacherId, UserId};

/// A yoga session as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub date: DateTime<Utc>,
    /// Null when the session has no (known) teacher.
    pub teacher_id: Option<TeacherId>,
    pub description: String,
    /// Participating users, ascending.
    pub users: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a session.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SessionDto {
    #[validate(
        length(max = 50, message = "name must be at most 50 characters"),
        custom(function = "validate_not_blank", message = "name must not be blank")
    )]
    pub name: String,
    /// RFC 3339 timestamp or epoch milliseconds
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub date: DateTime<Utc>,
    pub teacher_id: TeacherId,
    #[validate(length(max = 2500, message = "description must be at most 2500 characters"))]
    pub description: String,
    /// Replaces the participant set when present
    #[serde(default)]
    pub users: Option<Vec<UserId>>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Session fields after references have been resolved against the store.
///
/// `teacher_id` is `None` when the requested teacher does not exist, and
/// `users` holds only ids of existing users.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionData {
    pub name: String,
    pub date: DateTime<Utc>,
    pub teacher_id: Option<TeacherId>,
    pub description: String,
    pub users: Option<Vec<UserId>>,
}
