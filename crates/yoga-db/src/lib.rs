//! # Yoga DB
//!
//! Persistence for the yoga studio API.
//!
//! Handlers never touch SQL directly: they go through the repository traits
//! in [`repository`], bundled in a [`Store`]. Two backends implement them:
//!
//! - [`postgres::PgStore`]: PostgreSQL through SQLx, schema in `migrations/`
//! - [`memory::MemoryStore`]: in-process tables for tests and demo mode
//!
//! # Example
//!
//! ```ignore
//! use yoga_db::{Store, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&std::env::var("DATABASE_URL")?).await?;
//! run_migrations(&pool).await?;
//! let store = Store::postgres(pool);
//! let sessions = store.sessions.list_sessions().await?;
//! ```

pub mod error;
pub mod fixtures;
pub mod memory;
pub mod postgres;
pub mod repository;

use std::fmt;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{SessionRepository, TeacherRepository, UserRepository};
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool.
///
/// # Errors
///
/// Fails when the URL is malformed or the server is unreachable.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Repository handles shared by all request handlers.
#[derive(Clone)]
pub struct Store {
    pub sessions: Arc<dyn SessionRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_backend(Arc::new(PgStore::new(pool)))
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        Self::from_backend(Arc::new(store))
    }

    fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: SessionRepository + TeacherRepository + UserRepository + 'static,
    {
        Self {
            sessions: backend.clone(),
            teachers: backend.clone(),
            users: backend,
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
