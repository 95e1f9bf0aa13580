use anyhow::anyhow;
use tracing::{info, instrument};
use yoga_core::AppError;
use yoga_db::Store;
use yoga_models::{SessionId, UserId};

use crate::modules::sessions::model::{Session, SessionData, SessionDto};

pub struct SessionService;

impl SessionService {
    /// All sessions, ascending by id.
    #[instrument(skip(store))]
    pub async fn get_sessions(store: &Store) -> Result<Vec<Session>, AppError> {
        Ok(store.sessions.list_sessions().await?)
    }

    #[instrument(skip(store))]
    pub async fn get_session_by_id(store: &Store, id: SessionId) -> Result<Session, AppError> {
        store
            .sessions
            .find_session(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Session not found")))
    }

    /// Creates a session under a fresh id.
    ///
    /// An unknown `teacher_id` is stored as null rather than rejected, and
    /// unknown participant ids are dropped.
    #[instrument(skip(store))]
    pub async fn create_session(store: &Store, dto: SessionDto) -> Result<Session, AppError> {
        let data = Self::resolve_references(store, dto).await?;
        let session = store.sessions.create_session(data).await?;

        info!(session_id = %session.id, "Session created");
        Ok(session)
    }

    /// Replaces the session at `id`, creating it under that id when absent.
    ///
    /// Participants are replaced only when `dto.users` is present. The id
    /// must lie in `1..i64::MAX` so the id sequence can still advance past it.
    #[instrument(skip(store))]
    pub async fn update_session(
        store: &Store,
        id: SessionId,
        dto: SessionDto,
    ) -> Result<Session, AppError> {
        if !(1..i64::MAX).contains(&id.into_inner()) {
            return Err(AppError::bad_request(anyhow!("Invalid session id")));
        }

        let data = Self::resolve_references(store, dto).await?;
        Ok(store.sessions.upsert_session(id, data).await?)
    }

    #[instrument(skip(store))]
    pub async fn delete_session(store: &Store, id: SessionId) -> Result<(), AppError> {
        if !store.sessions.delete_session(id).await? {
            return Err(AppError::not_found(anyhow!("Session not found")));
        }

        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Adds `user_id` to the session. Repeating the call, or naming an
    /// unknown session or user, leaves the store unchanged.
    #[instrument(skip(store))]
    pub async fn participate(
        store: &Store,
        id: SessionId,
        user_id: UserId,
    ) -> Result<(), AppError> {
        store.sessions.add_participant(id, user_id).await?;
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn no_longer_participate(
        store: &Store,
        id: SessionId,
        user_id: UserId,
    ) -> Result<(), AppError> {
        store.sessions.remove_participant(id, user_id).await?;
        Ok(())
    }

    async fn resolve_references(store: &Store, dto: SessionDto) -> Result<SessionData, AppError> {
        let teacher_id = store
            .teachers
            .find_teacher(dto.teacher_id)
            .await?
            .map(|teacher| teacher.id);

        let users = match dto.users {
            Some(ids) => Some(store.users.existing_user_ids(&ids).await?),
            None => None,
        };

        Ok(SessionData {
            name: dto.name,
            date: dto.date,
            teacher_id,
            description: dto.description,
            users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use yoga_db::MemoryStore;
    use yoga_models::TeacherId;

    fn store() -> Store {
        Store::in_memory(MemoryStore::seeded().unwrap())
    }

    fn dto(teacher_id: i64, users: Option<Vec<i64>>) -> SessionDto {
        SessionDto {
            name: "Vinyasa".to_string(),
            date: Utc::now(),
            teacher_id: TeacherId::new(teacher_id),
            description: "Flow".to_string(),
            users: users.map(|ids| ids.into_iter().map(UserId::new).collect()),
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_teacher_stores_null() {
        let store = store();
        let session = SessionService::create_session(&store, dto(404, None))
            .await
            .unwrap();

        assert_eq!(session.teacher_id, None);
    }

    #[tokio::test]
    async fn test_create_keeps_known_teacher_and_filters_users() {
        let store = store();
        let session = SessionService::create_session(&store, dto(2, Some(vec![3, 77])))
            .await
            .unwrap();

        assert_eq!(session.teacher_id, Some(TeacherId::new(2)));
        assert_eq!(session.users, vec![UserId::new(3)]);
    }

    #[tokio::test]
    async fn test_get_missing_session_is_not_found() {
        let err = SessionService::get_session_by_id(&store(), SessionId::new(9999))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn test_update_rejects_ids_outside_sequence_range() {
        let store = store();
        for id in [0, -5, i64::MAX] {
            let err = SessionService::update_session(&store, SessionId::new(id), dto(1, None))
                .await
                .unwrap_err();
            assert_eq!(err.status.as_u16(), 400, "id {id}");
        }

        let created = SessionService::create_session(&store, dto(1, None))
            .await
            .unwrap();
        assert_eq!(created.id, SessionId::new(3));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = store();
        SessionService::delete_session(&store, SessionId::new(1))
            .await
            .unwrap();
        let err = SessionService::delete_session(&store, SessionId::new(1))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn test_participate_with_unknown_ids_is_noop() {
        let store = store();
        SessionService::participate(&store, SessionId::new(1), UserId::new(999))
            .await
            .unwrap();
        SessionService::participate(&store, SessionId::new(999), UserId::new(2))
            .await
            .unwrap();

        let session = SessionService::get_session_by_id(&store, SessionId::new(1))
            .await
            .unwrap();
        assert!(session.users.is_empty());
    }
}
