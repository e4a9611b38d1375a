use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Maps Postgres CHECK failures (SQLSTATE 23514) onto `ConstraintViolation`.
    pub fn classify(self) -> Self {
        match self {
            StorageError::Database(sqlx::Error::Database(ref e))
                if e.code().as_deref() == Some("23514") =>
            {
                let detail = e
                    .constraint()
                    .map(|c| format!("Value rejected by constraint {}", c))
                    .unwrap_or_else(|| "Value rejected by constraint".to_string());
                StorageError::ConstraintViolation(detail)
            }
            other => other,
        }
    }
}
