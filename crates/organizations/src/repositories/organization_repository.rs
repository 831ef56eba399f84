use std::sync::Arc;

use zccore_database::{
    collections, from_document, to_document, DatabaseResult, DocumentStore, Filter, ObjectId,
};

use crate::entities::{NewOrganization, Organization};

#[derive(Clone)]
pub struct OrganizationRepository {
    store: Arc<dyn DocumentStore>,
}

impl OrganizationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> DatabaseResult<Option<Organization>> {
        self.store
            .find_one(collections::ORGANIZATIONS, &Filter::by_id(id))
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn insert(&self, organization: &NewOrganization) -> DatabaseResult<Organization> {
        let created = self
            .store
            .insert_one(collections::ORGANIZATIONS, to_document(organization)?)
            .await?;
        from_document(created)
    }
}
