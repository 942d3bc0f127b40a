use booking_features::FormErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid reservation: {0}")]
    Validation(#[from] FormErrors),

    /// Carries the masked number only.
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound { entity, id: id.to_string() }
    }
}
