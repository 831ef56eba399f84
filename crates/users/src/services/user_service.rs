//! User service for managing user operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use zccore_database::{parse_object_id, DatabaseError, DocumentStore, ObjectId};

use crate::entities::{CreateUserRequest, NewUser, UpdateUserRequest, User};
use crate::repositories::UserRepository;
use crate::types::{UserError, UserResult};
use crate::utils::validate_email;

/// Service for managing user operations
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            user_repository: UserRepository::new(store),
        }
    }

    /// Register a new user. The email must be well formed and not taken.
    pub async fn create_user(&self, request: CreateUserRequest) -> UserResult<User> {
        let email = request.email.trim().to_string();
        validate_email(&email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "registration rejected, email already registered");
            return Err(UserError::EmailAlreadyExists);
        }

        let new_user = NewUser {
            email,
            first_name: non_blank(request.first_name),
            last_name: non_blank(request.last_name),
            display_name: non_blank(request.display_name),
            phone: non_blank(request.phone),
            created_at: Utc::now().to_rfc3339(),
        };

        let user = self
            .user_repository
            .insert(&new_user)
            .await
            .map_err(duplicate_email)?;

        info!(user_id = %user.id, email = %user.email, "created user");
        Ok(user)
    }

    /// Get a user by its textual id
    pub async fn get_user(&self, user_id: &str) -> UserResult<User> {
        let id = parse_object_id(user_id)?;
        self.find_existing(&id).await
    }

    /// Apply the non-empty fields of `request` and return the updated user.
    pub async fn update_user(&self, user_id: &str, request: UpdateUserRequest) -> UserResult<User> {
        let id = parse_object_id(user_id)?;
        let existing = self.find_existing(&id).await?;

        let fields = request.into_fields();
        if fields.is_empty() {
            return Err(UserError::EmptyUpdate);
        }

        if let Some(email) = fields.get("email").and_then(|value| value.as_str()) {
            validate_email(email)?;
            if email != existing.email {
                if let Some(owner) = self.user_repository.find_by_email(email).await? {
                    if owner.id != existing.id {
                        return Err(UserError::EmailAlreadyExists);
                    }
                }
            }
        }

        let result = self
            .user_repository
            .update(&id, fields)
            .await
            .map_err(duplicate_email)?;
        if result.matched_count == 0 {
            return Err(UserError::UserNotFound);
        }

        info!(user_id = %existing.id, modified = result.modified_count, "updated user");
        self.find_existing(&id).await
    }

    /// Delete a user. Memberships keep their email snapshot.
    pub async fn delete_user(&self, user_id: &str) -> UserResult<()> {
        let id = parse_object_id(user_id)?;
        let result = self.user_repository.delete(&id).await?;
        if result.deleted_count == 0 {
            return Err(UserError::UserNotFound);
        }

        warn!(user_id = %id, "deleted user");
        Ok(())
    }

    async fn find_existing(&self, id: &ObjectId) -> UserResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::UserNotFound)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn duplicate_email(error: DatabaseError) -> UserError {
    if error.is_duplicate() {
        UserError::EmailAlreadyExists
    } else {
        UserError::from(error)
    }
}
