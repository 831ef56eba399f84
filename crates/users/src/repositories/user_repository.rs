//! Data access for the `users` collection.

use std::sync::Arc;

use zccore_database::{
    collections, from_document, to_document, DatabaseResult, DeleteResult, Document,
    DocumentStore, Filter, ObjectId, UpdateResult,
};

use crate::entities::{NewUser, User};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> DatabaseResult<Option<User>> {
        self.store
            .find_one(collections::USERS, &Filter::by_id(id))
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        self.store
            .find_one(collections::USERS, &Filter::new().eq("email", email))
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn insert(&self, user: &NewUser) -> DatabaseResult<User> {
        let created = self
            .store
            .insert_one(collections::USERS, to_document(user)?)
            .await?;
        from_document(created)
    }

    pub async fn update(&self, id: &ObjectId, fields: Document) -> DatabaseResult<UpdateResult> {
        self.store.update_one(collections::USERS, id, fields).await
    }

    pub async fn delete(&self, id: &ObjectId) -> DatabaseResult<DeleteResult> {
        self.store.delete_one(collections::USERS, id).await
    }
}
