//! Data access for the `members` collection.

use std::sync::Arc;

use zccore_database::{
    collections, from_document, to_document, DatabaseResult, DocumentStore, Filter,
};

use crate::entities::{Member, NewMember};

#[derive(Clone)]
pub struct MemberRepository {
    store: Arc<dyn DocumentStore>,
}

impl MemberRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_org_and_email(
        &self,
        org_id: &str,
        email: &str,
    ) -> DatabaseResult<Option<Member>> {
        let filter = Filter::new().eq("org_id", org_id).eq("email", email);
        self.store
            .find_one(collections::MEMBERS, &filter)
            .await?
            .map(from_document)
            .transpose()
    }

    /// All members of an organization in store order.
    pub async fn find_by_org(&self, org_id: &str) -> DatabaseResult<Vec<Member>> {
        self.store
            .find_many(collections::MEMBERS, &Filter::new().eq("org_id", org_id))
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn insert(&self, member: &NewMember) -> DatabaseResult<Member> {
        let created = self
            .store
            .insert_one(collections::MEMBERS, to_document(member)?)
            .await?;
        from_document(created)
    }
}
