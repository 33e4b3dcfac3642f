use model::password::PasswordError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::debug;

/// Error types for the data-access layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row with the requested primary key
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A foreign key in the request points at a row that does not exist
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A unique column already holds the submitted value
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Error from password hashing
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        StoreError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

// Constraint violations the database reports are mapped onto the structured
// kinds; everything else stays a plain database error.
impl From<DbErr> for StoreError {
    fn from(error: DbErr) -> Self {
        match error.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                debug!("Unique constraint violation: {}", detail);
                StoreError::Conflict(detail)
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                debug!("Foreign key constraint violation: {}", detail);
                StoreError::InvalidReference(detail)
            }
            _ => StoreError::Database(error),
        }
    }
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_db_error_stays_database() {
        let err = StoreError::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, StoreError::Database(_)));
        let message = err.to_string();
        assert!(message.starts_with("Database error:"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("attendance record", 7);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "attendance record with id 7 not found");
    }
}
