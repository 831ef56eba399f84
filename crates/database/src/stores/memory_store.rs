//! In-process document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::DocumentStore;
use crate::document::{
    assign_id, collections, document_id, merge_patch, DeleteResult, Document, Filter, UpdateResult,
};
use crate::types::{DatabaseError, DatabaseResult};

#[derive(Debug, Clone)]
struct UniqueIndex {
    collection: String,
    fields: Vec<String>,
}

impl UniqueIndex {
    /// Indexed values of `document`, or `None` when a field is missing or null.
    fn key<'a>(&self, document: &'a Document) -> Option<Vec<&'a Value>> {
        self.fields
            .iter()
            .map(|field| document.get(field).filter(|value| !value.is_null()))
            .collect()
    }
}

/// Document store kept in memory. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    unique_indexes: Vec<UniqueIndex>,
}

impl MemoryDocumentStore {
    /// Create an empty store without unique indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the same unique indexes as the SQLite schema.
    pub fn with_default_indexes() -> Self {
        Self::new()
            .with_unique_index(collections::USERS, &["email"])
            .with_unique_index(collections::MEMBERS, &["org_id", "email"])
    }

    pub fn with_unique_index(mut self, collection: &str, fields: &[&str]) -> Self {
        self.unique_indexes.push(UniqueIndex {
            collection: collection.to_string(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
        });
        self
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check_unique(
        &self,
        collection: &str,
        existing: &[Document],
        candidate: &Document,
        skip_id: Option<&str>,
    ) -> DatabaseResult<()> {
        for index in self
            .unique_indexes
            .iter()
            .filter(|index| index.collection == collection)
        {
            let Some(key) = index.key(candidate) else {
                continue;
            };
            let clash = existing
                .iter()
                .filter(|document| skip_id.is_none() || document_id(document) != skip_id)
                .any(|document| index.key(document).as_ref() == Some(&key));
            if clash {
                debug!(collection, fields = ?index.fields, "unique index rejected write");
                return Err(DatabaseError::Duplicate(collection.to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> DatabaseResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|document| filter.matches(document)))
            .cloned())
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> DatabaseResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> DatabaseResult<Document> {
        let id = assign_id(&mut document)?.to_hex();

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        if documents
            .iter()
            .any(|existing| document_id(existing) == Some(id.as_str()))
        {
            return Err(DatabaseError::Duplicate(collection.to_string()));
        }
        self.check_unique(collection, documents, &document, None)?;

        documents.push(document.clone());
        Ok(document)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &ObjectId,
        fields: Document,
    ) -> DatabaseResult<UpdateResult> {
        let id = id.to_hex();
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            });
        };
        let Some(position) = documents
            .iter()
            .position(|document| document_id(document) == Some(id.as_str()))
        else {
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            });
        };

        let mut updated = documents[position].clone();
        merge_patch(&mut updated, fields);
        if updated == documents[position] {
            return Ok(UpdateResult {
                matched_count: 1,
                modified_count: 0,
            });
        }

        self.check_unique(collection, documents, &updated, Some(id.as_str()))?;
        documents[position] = updated;

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: 1,
        })
    }

    async fn delete_one(&self, collection: &str, id: &ObjectId) -> DatabaseResult<DeleteResult> {
        let id = id.to_hex();
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(collection) {
            Some(documents) => {
                let before = documents.len();
                documents.retain(|document| document_id(document) != Some(id.as_str()));
                (before - documents.len()) as u64
            }
            None => 0,
        };
        Ok(DeleteResult { deleted_count })
    }
}
