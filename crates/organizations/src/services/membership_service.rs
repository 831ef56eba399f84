//! Membership creation and listing.
//!
//! Creation runs resolve organization, resolve user, validate, write. Any
//! step may fail and nothing is written unless every step before the write
//! succeeded.

use std::sync::Arc;

use tracing::{info, instrument};
use zccore_database::{parse_object_id, DocumentStore};

use crate::entities::Member;
use crate::repositories::MemberRepository;
use crate::services::accessors::EntityAccessors;
use crate::services::reader::MembershipReader;
use crate::services::validator::MembershipValidator;
use crate::services::writer::MembershipWriter;
use crate::types::OrganizationResult;

#[derive(Clone)]
pub struct MembershipService {
    accessors: EntityAccessors,
    validator: MembershipValidator,
    writer: MembershipWriter,
    reader: MembershipReader,
}

impl MembershipService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let accessors = EntityAccessors::new(Arc::clone(&store));
        let members = MemberRepository::new(store);
        Self {
            validator: MembershipValidator::new(members.clone()),
            writer: MembershipWriter::new(members.clone()),
            reader: MembershipReader::new(accessors.clone(), members),
            accessors,
        }
    }

    /// Add the user to the organization, snapshotting the user's current email.
    ///
    /// Both ids are parsed before the store is touched.
    #[instrument(skip(self))]
    pub async fn create_membership(&self, org_id: &str, user_id: &str) -> OrganizationResult<Member> {
        let org_oid = parse_object_id(org_id)?;
        let user_oid = parse_object_id(user_id)?;

        let organization = self.accessors.find_organization(&org_oid).await?;
        let user = self.accessors.find_user(&user_oid).await?;
        let candidate = self
            .validator
            .validate_new_membership(&organization, &user)
            .await?;
        let member = self.writer.insert_membership(candidate).await?;

        info!(
            member_id = %member.id,
            org_id = %member.org_id,
            email = %member.email,
            "added member to organization"
        );
        Ok(member)
    }

    pub async fn list_members(&self, org_id: &str) -> OrganizationResult<Vec<Member>> {
        self.reader.list_members(org_id).await
    }
}
