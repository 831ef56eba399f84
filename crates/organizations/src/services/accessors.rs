//! Typed existence checks for the entities a membership points at.

use std::sync::Arc;

use tracing::debug;
use zccore_database::{parse_object_id, DocumentStore, ObjectId};
use zccore_users::{User, UserRepository};

use crate::entities::Organization;
use crate::repositories::OrganizationRepository;
use crate::types::{OrganizationError, OrganizationResult};

#[derive(Clone)]
pub struct EntityAccessors {
    organizations: OrganizationRepository,
    users: UserRepository,
}

impl EntityAccessors {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            organizations: OrganizationRepository::new(Arc::clone(&store)),
            users: UserRepository::new(store),
        }
    }

    /// Parse `org_id` and load the organization it names.
    pub async fn resolve_organization(&self, org_id: &str) -> OrganizationResult<Organization> {
        let id = parse_object_id(org_id)?;
        self.find_organization(&id).await
    }

    /// Parse `user_id` and load the user it names.
    pub async fn resolve_user(&self, user_id: &str) -> OrganizationResult<User> {
        let id = parse_object_id(user_id)?;
        self.find_user(&id).await
    }

    pub async fn find_organization(&self, id: &ObjectId) -> OrganizationResult<Organization> {
        self.organizations.find_by_id(id).await?.ok_or_else(|| {
            debug!(org_id = %id, "organization lookup missed");
            OrganizationError::organization_not_found(id.to_hex())
        })
    }

    pub async fn find_user(&self, id: &ObjectId) -> OrganizationResult<User> {
        self.users.find_by_id(id).await?.ok_or_else(|| {
            debug!(user_id = %id, "user lookup missed");
            OrganizationError::user_not_found(id.to_hex())
        })
    }
}
