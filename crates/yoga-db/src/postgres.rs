//! PostgreSQL backend.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use tracing::instrument;
use yoga_models::{
    NewUser, Session, SessionData, SessionId, Teacher, TeacherId, User, UserCredentials, UserId,
};

use crate::error::StoreError;
use crate::repository::{SessionRepository, TeacherRepository, UserRepository};

const SESSION_SELECT: &str = r#"SELECT
        s.id,
        s.name,
        s.date,
        s.teacher_id,
        s.description,
        COALESCE(
            ARRAY_AGG(p.user_id ORDER BY p.user_id) FILTER (WHERE p.user_id IS NOT NULL),
            '{}'::BIGINT[]
        ) AS users,
        s.created_at,
        s.updated_at
       FROM sessions s
       LEFT JOIN participate p ON p.session_id = s.id"#;

const USER_COLUMNS: &str = "id, email, first_name, last_name, admin, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn select_session<'e, E>(executor: E, id: SessionId) -> Result<Option<Session>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!("{SESSION_SELECT} WHERE s.id = $1 GROUP BY s.id");
    sqlx::query_as::<_, Session>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

async fn replace_participants(
    tx: &mut Transaction<'_, Postgres>,
    session_id: SessionId,
    users: &[UserId],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM participate WHERE session_id = $1")
        .bind(session_id)
        .execute(&mut **tx)
        .await?;

    // Ids without a matching user are skipped by the join.
    sqlx::query(
        r#"INSERT INTO participate (session_id, user_id)
           SELECT $1, u.id FROM users u WHERE u.id = ANY($2)
           ON CONFLICT DO NOTHING"#,
    )
    .bind(session_id)
    .bind(users)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[async_trait]
impl SessionRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError> {
        let query = format!("{SESSION_SELECT} GROUP BY s.id ORDER BY s.id");
        let sessions = sqlx::query_as::<_, Session>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(sessions)
    }

    #[instrument(skip(self))]
    async fn find_session(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        Ok(select_session(&self.pool, id).await?)
    }

    #[instrument(skip(self))]
    async fn create_session(&self, data: SessionData) -> Result<Session, StoreError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, SessionId>(
            r#"INSERT INTO sessions (name, date, teacher_id, description)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(&data.name)
        .bind(data.date)
        .bind(data.teacher_id)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(users) = &data.users {
            replace_participants(&mut tx, id, users).await?;
        }

        let session = select_session(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;

        Ok(session)
    }

    #[instrument(skip(self))]
    async fn upsert_session(
        &self,
        id: SessionId,
        data: SessionData,
    ) -> Result<Session, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Blocks concurrent inserts, so no nextval runs between the read and
        // the setval below.
        sqlx::query("LOCK TABLE sessions IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"INSERT INTO sessions (id, name, date, teacher_id, description)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (id) DO UPDATE
               SET name = EXCLUDED.name,
                   date = EXCLUDED.date,
                   teacher_id = EXCLUDED.teacher_id,
                   description = EXCLUDED.description,
                   updated_at = NOW()"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.date)
        .bind(data.teacher_id)
        .bind(&data.description)
        .execute(&mut *tx)
        .await?;

        // An explicit id may run ahead of the identity sequence; never move it backwards.
        sqlx::query(
            r#"WITH seq AS (SELECT pg_get_serial_sequence('sessions', 'id')::regclass AS name)
               SELECT setval(seq.name, GREATEST($1, pg_sequence_last_value(seq.name)))
               FROM seq"#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(users) = &data.users {
            replace_participants(&mut tx, id, users).await?;
        }

        let session = select_session(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;

        Ok(session)
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, id: SessionId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn add_participant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"INSERT INTO participate (session_id, user_id)
               SELECT s.id, u.id
               FROM sessions s, users u
               WHERE s.id = $1 AND u.id = $2
               ON CONFLICT DO NOTHING"#,
        )
        .bind(session_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_participant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM participate WHERE session_id = $1 AND user_id = $2")
            .bind(session_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TeacherRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_teachers(&self) -> Result<Vec<Teacher>, StoreError> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT id, first_name, last_name, created_at, updated_at FROM teachers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teachers)
    }

    #[instrument(skip(self))]
    async fn find_teacher(&self, id: TeacherId) -> Result<Option<Teacher>, StoreError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, first_name, last_name, created_at, updated_at FROM teachers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, first_name, last_name, admin, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            r#"INSERT INTO users (email, first_name, last_name, password, admin)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {USER_COLUMNS}"#
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return StoreError::DuplicateEmail(user.email.clone());
                    }
                }
                StoreError::from(e)
            })
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn existing_user_ids(&self, ids: &[UserId]) -> Result<Vec<UserId>, StoreError> {
        let existing =
            sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE id = ANY($1) ORDER BY id")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(existing)
    }
}
