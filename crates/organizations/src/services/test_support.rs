//! Fixtures shared by the service unit tests.

use std::sync::Arc;

use zccore_database::{collections, to_document, DocumentStore, MemoryDocumentStore};
use zccore_users::User;

use crate::entities::Organization;

pub const ORG_ID: &str = "507f1f77bcf86cd799439011";
pub const USER_ID: &str = "5f9d88b9d2c1b814b4d6f3a1";

pub fn organization() -> Organization {
    Organization {
        id: ORG_ID.to_string(),
        name: "Acme".to_string(),
        description: None,
        creator_email: None,
        created_at: "2021-06-01T00:00:00+00:00".to_string(),
        extra: Default::default(),
    }
}

pub fn user() -> User {
    User {
        id: USER_ID.to_string(),
        email: "a@example.com".to_string(),
        first_name: None,
        last_name: None,
        display_name: None,
        phone: None,
        created_at: "2021-06-01T00:00:00+00:00".to_string(),
    }
}

/// A store holding the fixture organization and user and no members.
pub async fn seeded_store() -> Arc<MemoryDocumentStore> {
    let store = Arc::new(MemoryDocumentStore::with_default_indexes());
    store
        .insert_one(collections::ORGANIZATIONS, to_document(&organization()).unwrap())
        .await
        .unwrap();
    store
        .insert_one(collections::USERS, to_document(&user()).unwrap())
        .await
        .unwrap();
    store
}
