//! Document store implementations

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryDocumentStore;
pub use sqlite_store::SqliteDocumentStore;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::document::{DeleteResult, Document, Filter, UpdateResult};
use crate::types::DatabaseResult;

/// Minimal document-store contract used by every service.
///
/// Each call is atomic for a single document only; nothing spans collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, collection: &str, filter: &Filter) -> DatabaseResult<Option<Document>>;

    /// All matching documents, in insertion order.
    async fn find_many(&self, collection: &str, filter: &Filter) -> DatabaseResult<Vec<Document>>;

    /// Insert a document and return it with its `_id`.
    ///
    /// A valid `_id` supplied by the caller is kept; otherwise a new one is assigned.
    /// Unique index violations are reported as [`DatabaseError::Duplicate`](crate::DatabaseError::Duplicate).
    async fn insert_one(&self, collection: &str, document: Document) -> DatabaseResult<Document>;

    /// Apply `fields` to the document as a JSON merge patch (RFC 7396).
    ///
    /// Nested objects merge recursively and null removes a field. `_id` is ignored.
    async fn update_one(
        &self,
        collection: &str,
        id: &ObjectId,
        fields: Document,
    ) -> DatabaseResult<UpdateResult>;

    async fn delete_one(&self, collection: &str, id: &ObjectId) -> DatabaseResult<DeleteResult>;
}
