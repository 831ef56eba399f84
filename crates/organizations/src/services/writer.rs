use tracing::error;

use crate::entities::{Member, NewMember};
use crate::repositories::MemberRepository;
use crate::types::{OrganizationError, OrganizationResult};

/// Inserts validated memberships.
#[derive(Clone)]
pub struct MembershipWriter {
    members: MemberRepository,
}

impl MembershipWriter {
    pub fn new(members: MemberRepository) -> Self {
        Self { members }
    }

    /// Write the candidate. A unique index violation means a concurrent
    /// request won the race and is reported as a duplicate membership.
    pub async fn insert_membership(&self, candidate: NewMember) -> OrganizationResult<Member> {
        match self.members.insert(&candidate).await {
            Ok(member) => Ok(member),
            Err(e) if e.is_duplicate() => Err(OrganizationError::DuplicateMembership {
                org_id: candidate.org_id,
                email: candidate.email,
            }),
            Err(e) => {
                error!(org_id = %candidate.org_id, error = %e, "failed to insert member");
                Err(OrganizationError::Write(e))
            }
        }
    }
}
