use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use zccore_database::{parse_object_id, DocumentStore};
use zccore_users::utils::validate_email;

use crate::entities::{CreateOrganizationRequest, NewOrganization, Organization};
use crate::repositories::OrganizationRepository;
use crate::types::{OrganizationError, OrganizationResult};

/// Service for creating and fetching organizations
#[derive(Clone)]
pub struct OrganizationService {
    organization_repository: OrganizationRepository,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            organization_repository: OrganizationRepository::new(store),
        }
    }

    pub async fn create_organization(
        &self,
        request: CreateOrganizationRequest,
    ) -> OrganizationResult<Organization> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(OrganizationError::validation("organization name is required"));
        }

        let creator_email = request
            .creator_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());
        if let Some(email) = &creator_email {
            validate_email(email)
                .map_err(|_| OrganizationError::validation("creator email is not valid"))?;
        }

        let new_organization = NewOrganization {
            name,
            description: request
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            creator_email,
            created_at: Utc::now().to_rfc3339(),
        };

        let organization = self.organization_repository.insert(&new_organization).await?;
        info!(org_id = %organization.id, name = %organization.name, "created organization");
        Ok(organization)
    }

    pub async fn get_organization(&self, org_id: &str) -> OrganizationResult<Organization> {
        let id = parse_object_id(org_id)?;
        self.organization_repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| OrganizationError::organization_not_found(org_id))
    }
}
