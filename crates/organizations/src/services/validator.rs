use tracing::debug;
use zccore_users::User;

use crate::entities::{NewMember, Organization};
use crate::repositories::MemberRepository;
use crate::types::{OrganizationError, OrganizationResult};

/// Checks that a user is not yet a member before a membership is written.
#[derive(Clone)]
pub struct MembershipValidator {
    members: MemberRepository,
}

impl MembershipValidator {
    pub fn new(members: MemberRepository) -> Self {
        Self { members }
    }

    /// Build the candidate member for an already resolved organization and user.
    ///
    /// The store's unique index on `(org_id, email)` remains the final arbiter;
    /// this lookup only rejects the common case early.
    pub async fn validate_new_membership(
        &self,
        organization: &Organization,
        user: &User,
    ) -> OrganizationResult<NewMember> {
        let candidate = NewMember {
            org_id: organization.id.clone(),
            email: user.email.clone(),
        };

        if self
            .members
            .find_by_org_and_email(&candidate.org_id, &candidate.email)
            .await?
            .is_some()
        {
            debug!(org_id = %candidate.org_id, email = %candidate.email, "membership already exists");
            return Err(OrganizationError::DuplicateMembership {
                org_id: candidate.org_id,
                email: candidate.email,
            });
        }

        Ok(candidate)
    }
}
