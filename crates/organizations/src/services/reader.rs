use crate::entities::Member;
use crate::repositories::MemberRepository;
use crate::services::accessors::EntityAccessors;
use crate::types::OrganizationResult;

/// Lists the members of an existing organization.
#[derive(Clone)]
pub struct MembershipReader {
    accessors: EntityAccessors,
    members: MemberRepository,
}

impl MembershipReader {
    pub fn new(accessors: EntityAccessors, members: MemberRepository) -> Self {
        Self { accessors, members }
    }

    /// The organization is resolved first; `members` is not queried when it is absent.
    pub async fn list_members(&self, org_id: &str) -> OrganizationResult<Vec<Member>> {
        let organization = self.accessors.resolve_organization(org_id).await?;
        Ok(self.members.find_by_org(&organization.id).await?)
    }
}
