#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("No {0} ids left to allocate")]
    IdsExhausted(&'static str),

    #[error("Fixture error: {0}")]
    Fixture(String),
}
