//! Error types for the user management system.

use thiserror::Error;
use zccore_database::DatabaseError;

/// User-related errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("No fields to update")]
    EmptyUpdate,

    #[error("Database error: {0}")]
    Database(DatabaseError),
}

impl From<DatabaseError> for UserError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::InvalidId(raw) => UserError::InvalidId(raw),
            other => UserError::Database(other),
        }
    }
}
