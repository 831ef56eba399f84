//! zccore Database Crate
//!
//! The document store gateway: a collection/filter based [`DocumentStore`]
//! trait with a SQLite implementation (JSON bodies in one table) and an
//! in-memory implementation. Stores give single-document atomicity only.

pub mod connection;
pub mod document;
pub mod migrations;
pub mod stores;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use document::{
    collections, document_id, from_document, parse_object_id, to_document, DeleteResult,
    Document, Filter, UpdateResult, ID_FIELD,
};
pub use stores::{DocumentStore, MemoryDocumentStore, SqliteDocumentStore};
pub use types::{DatabaseError, DatabaseResult};

/// Identifier type used by every collection.
pub use bson::oid::ObjectId;

use sqlx::SqlitePool;
use zccore_config::DatabaseConfig;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
