//! Error types for organizations and memberships.

use thiserror::Error;
use zccore_database::DatabaseError;

/// Result type alias for organization operations
pub type OrganizationResult<T> = Result<T, OrganizationError>;

#[derive(Debug, Error)]
pub enum OrganizationError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Organization not found: {id}")]
    OrganizationNotFound { id: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("{email} is already a member of organization {org_id}")]
    DuplicateMembership { org_id: String, email: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The membership insert itself failed.
    #[error("Failed to write member: {0}")]
    Write(DatabaseError),

    #[error("Database error: {0}")]
    Database(DatabaseError),
}

impl OrganizationError {
    pub fn organization_not_found(id: impl Into<String>) -> Self {
        Self::OrganizationNotFound { id: id.into() }
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether a referenced organization or user is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OrganizationNotFound { .. } | Self::UserNotFound { .. }
        )
    }
}

impl From<DatabaseError> for OrganizationError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::InvalidId(raw) => Self::InvalidId(raw),
            other => Self::Database(other),
        }
    }
}
