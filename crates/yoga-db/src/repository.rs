//! Repository traits implemented by every storage backend.

use async_trait::async_trait;
use yoga_models::{
    NewUser, Session, SessionData, SessionId, Teacher, TeacherId, User, UserCredentials, UserId,
};

use crate::error::StoreError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// All sessions, ascending by id.
    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError>;

    async fn find_session(&self, id: SessionId) -> Result<Option<Session>, StoreError>;

    /// Inserts under a fresh id. `data.users`, when present, seeds the participants.
    async fn create_session(&self, data: SessionData) -> Result<Session, StoreError>;

    /// Replaces the session at `id`, inserting it under that id when absent.
    ///
    /// Participants are replaced only when `data.users` is present.
    async fn upsert_session(&self, id: SessionId, data: SessionData)
    -> Result<Session, StoreError>;

    /// Returns `false` when no session had that id.
    async fn delete_session(&self, id: SessionId) -> Result<bool, StoreError>;

    /// Returns `true` only if a new pair was recorded. Unknown session or
    /// user ids and already-present pairs leave the store untouched.
    async fn add_participant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<bool, StoreError>;

    /// Returns `true` if the pair existed.
    async fn remove_participant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// All teachers, ascending by id.
    async fn list_teachers(&self) -> Result<Vec<Teacher>, StoreError>;

    async fn find_teacher(&self, id: TeacherId) -> Result<Option<Teacher>, StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Also drops the user from every session. Returns `false` when absent.
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError>;

    /// The subset of `ids` that belong to existing users, ascending and deduplicated.
    async fn existing_user_ids(&self, ids: &[UserId]) -> Result<Vec<UserId>, StoreError>;
}
