//! In-process backend used by the test suite and `serve --in-memory`.
//!
//! Mirrors the PostgreSQL schema: sessions, teachers, users and the
//! `participate` join set, with the same referential rules (deleting a
//! session or a user drops its participations).

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use yoga_models::{
    NewUser, Session, SessionData, SessionId, Teacher, TeacherId, User, UserCredentials, UserId,
};

use crate::error::StoreError;
use crate::fixtures;
use crate::repository::{SessionRepository, TeacherRepository, UserRepository};

#[derive(Debug, Clone)]
struct SessionRow {
    name: String,
    date: DateTime<Utc>,
    teacher_id: Option<TeacherId>,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct UserRow {
    user: User,
    password: String,
}

#[derive(Debug)]
struct Tables {
    sessions: BTreeMap<SessionId, SessionRow>,
    teachers: BTreeMap<TeacherId, Teacher>,
    users: BTreeMap<UserId, UserRow>,
    participate: BTreeSet<(SessionId, UserId)>,
    next_session_id: i64,
    next_user_id: i64,
}

impl Tables {
    fn empty() -> Self {
        Self {
            sessions: BTreeMap::new(),
            teachers: BTreeMap::new(),
            users: BTreeMap::new(),
            participate: BTreeSet::new(),
            next_session_id: 1,
            next_user_id: 1,
        }
    }

    fn session(&self, id: SessionId) -> Option<Session> {
        let row = self.sessions.get(&id)?;
        let users = self
            .participate
            .range((id, UserId::new(i64::MIN))..=(id, UserId::new(i64::MAX)))
            .map(|&(_, user_id)| user_id)
            .collect();

        Some(Session {
            id,
            name: row.name.clone(),
            date: row.date,
            teacher_id: row.teacher_id,
            description: row.description.clone(),
            users,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn replace_participants(&mut self, session_id: SessionId, users: &[UserId]) {
        self.participate.retain(|&(s, _)| s != session_id);
        for &user_id in users {
            if self.users.contains_key(&user_id) {
                self.participate.insert((session_id, user_id));
            }
        }
    }
}

/// Thread-safe in-memory store.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::empty()),
        }
    }

    /// A store holding the demo teachers, users and sessions.
    pub fn seeded() -> Result<Self, StoreError> {
        let now = Utc::now();
        let password = fixtures::fixture_password_hash()?;
        let mut tables = Tables::empty();

        for teacher in fixtures::teachers() {
            tables.teachers.insert(
                teacher.id,
                Teacher {
                    id: teacher.id,
                    first_name: teacher.first_name.to_string(),
                    last_name: teacher.last_name.to_string(),
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        for user in fixtures::users() {
            tables.next_user_id = tables.next_user_id.max(user.id.into_inner() + 1);
            tables.users.insert(
                user.id,
                UserRow {
                    user: User {
                        id: user.id,
                        email: user.email.to_string(),
                        first_name: user.first_name.to_string(),
                        last_name: user.last_name.to_string(),
                        admin: user.admin,
                        created_at: now,
                        updated_at: now,
                    },
                    password: password.clone(),
                },
            );
        }

        for session in fixtures::sessions()? {
            tables.next_session_id = tables.next_session_id.max(session.id.into_inner() + 1);
            tables.sessions.insert(
                session.id,
                SessionRow {
                    name: session.name.to_string(),
                    date: session.date,
                    teacher_id: Some(session.teacher_id),
                    description: session.description.to_string(),
                    created_at: now,
                    updated_at: now,
                },
            );
            tables.replace_participants(session.id, session.users);
        }

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .keys()
            .filter_map(|&id| tables.session(id))
            .collect())
    }

    async fn find_session(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.tables.read().await.session(id))
    }

    async fn create_session(&self, data: SessionData) -> Result<Session, StoreError> {
        let mut tables = self.tables.write().await;
        let id = SessionId::new(tables.next_session_id);
        tables.next_session_id = id
            .into_inner()
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted("sessions"))?;

        let now = Utc::now();
        tables.sessions.insert(
            id,
            SessionRow {
                name: data.name,
                date: data.date,
                teacher_id: data.teacher_id,
                description: data.description,
                created_at: now,
                updated_at: now,
            },
        );
        if let Some(users) = &data.users {
            tables.replace_participants(id, users);
        }

        tables
            .session(id)
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn upsert_session(
        &self,
        id: SessionId,
        data: SessionData,
    ) -> Result<Session, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created_at = tables
            .sessions
            .get(&id)
            .map_or(now, |existing| existing.created_at);

        tables.sessions.insert(
            id,
            SessionRow {
                name: data.name,
                date: data.date,
                teacher_id: data.teacher_id,
                description: data.description,
                created_at,
                updated_at: now,
            },
        );
        tables.next_session_id = tables
            .next_session_id
            .max(id.into_inner().saturating_add(1));
        if let Some(users) = &data.users {
            tables.replace_participants(id, users);
        }

        tables
            .session(id)
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn delete_session(&self, id: SessionId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.sessions.remove(&id).is_none() {
            return Ok(false);
        }
        tables.participate.retain(|&(s, _)| s != id);
        Ok(true)
    }

    async fn add_participant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.sessions.contains_key(&session_id) || !tables.users.contains_key(&user_id) {
            return Ok(false);
        }
        Ok(tables.participate.insert((session_id, user_id)))
    }

    async fn remove_participant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.participate.remove(&(session_id, user_id)))
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn list_teachers(&self) -> Result<Vec<Teacher>, StoreError> {
        Ok(self.tables.read().await.teachers.values().cloned().collect())
    }

    async fn find_teacher(&self, id: TeacherId) -> Result<Option<Teacher>, StoreError> {
        Ok(self.tables.read().await.teachers.get(&id).cloned())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .get(&id)
            .map(|row| row.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|row| row.user.email == email)
            .map(|row| UserCredentials {
                id: row.user.id,
                email: row.user.email.clone(),
                first_name: row.user.first_name.clone(),
                last_name: row.user.last_name.clone(),
                admin: row.user.admin,
                password: row.password.clone(),
            }))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|row| row.user.email == email))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|row| row.user.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        let id = UserId::new(tables.next_user_id);
        tables.next_user_id += 1;

        let now = Utc::now();
        let created = User {
            id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            admin: user.admin,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(
            id,
            UserRow {
                user: created.clone(),
                password: user.password_hash,
            },
        );

        Ok(created)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.participate.retain(|&(_, u)| u != id);
        Ok(true)
    }

    async fn existing_user_ids(&self, ids: &[UserId]) -> Result<Vec<UserId>, StoreError> {
        let tables = self.tables.read().await;
        let existing: BTreeSet<UserId> = ids
            .iter()
            .copied()
            .filter(|id| tables.users.contains_key(id))
            .collect();
        Ok(existing.into_iter().collect())
    }
}
