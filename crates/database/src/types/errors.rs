//! Error types for the document store layer

use thiserror::Error;

/// Errors surfaced by a [`DocumentStore`](crate::DocumentStore) implementation.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Invalid document id: {0}")]
    InvalidId(String),

    /// A unique index rejected the write.
    #[error("Duplicate document in collection {0}")]
    Duplicate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DatabaseError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::Duplicate(_))
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        DatabaseError::Serialization(error.to_string())
    }
}
