//! SQLite-backed document store.
//!
//! All collections share the `documents` table; bodies are JSON text and
//! filters are evaluated with `json_extract`. Unique indexes are declared in
//! the migrations.

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::Value;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use zccore_config::DatabaseConfig;

use super::DocumentStore;
use crate::document::{assign_id, DeleteResult, Document, Filter, UpdateResult, ID_FIELD};
use crate::types::{DatabaseError, DatabaseResult};

#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Wrap a pool whose schema is already migrated.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect and apply migrations.
    pub async fn from_config(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let pool = crate::initialize_database(config).await?;
        Ok(Self::new(pool))
    }

    fn select<'a>(
        collection: &'a str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> DatabaseResult<QueryBuilder<'a, Sqlite>> {
        let mut builder = QueryBuilder::new("SELECT body FROM documents WHERE collection = ");
        builder.push_bind(collection);
        push_filter(&mut builder, filter)?;
        builder.push(" ORDER BY seq ASC");
        if let Some(limit) = limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }
        Ok(builder)
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) -> DatabaseResult<()> {
    for (field, value) in filter.iter() {
        if field == ID_FIELD {
            let id = value
                .as_str()
                .ok_or_else(|| DatabaseError::InvalidId(value.to_string()))?;
            builder.push(" AND id = ");
            builder.push_bind(id.to_string());
            continue;
        }

        builder.push(" AND json_extract(body, ");
        builder.push_bind(format!("$.\"{field}\""));
        builder.push(")");
        match value {
            Value::Null => {
                builder.push(" IS NULL");
            }
            Value::Bool(flag) => {
                builder.push(" = ");
                builder.push_bind(i64::from(*flag));
            }
            Value::Number(number) => {
                builder.push(" = ");
                if let Some(integer) = number.as_i64() {
                    builder.push_bind(integer);
                } else {
                    let float = number.as_f64().ok_or_else(|| {
                        DatabaseError::QueryError(format!("unsupported number in filter on {field}"))
                    })?;
                    builder.push_bind(float);
                }
            }
            Value::String(text) => {
                builder.push(" = ");
                builder.push_bind(text.clone());
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(DatabaseError::QueryError(format!(
                    "unsupported filter value for field {field}"
                )));
            }
        }
    }
    Ok(())
}

fn decode_body(row: &sqlx::sqlite::SqliteRow) -> DatabaseResult<Document> {
    let body: String = row
        .try_get("body")
        .map_err(|e| DatabaseError::QueryError(e.to_string()))?;
    Ok(serde_json::from_str(&body)?)
}

fn map_write_error(collection: &str, error: sqlx::Error) -> DatabaseError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            DatabaseError::Duplicate(collection.to_string())
        }
        _ => DatabaseError::QueryError(error.to_string()),
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> DatabaseResult<Option<Document>> {
        let mut builder = Self::select(collection, filter, Some(1))?;
        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        row.as_ref().map(decode_body).transpose()
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> DatabaseResult<Vec<Document>> {
        let mut builder = Self::select(collection, filter, None)?;
        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        rows.iter().map(decode_body).collect()
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> DatabaseResult<Document> {
        let id = assign_id(&mut document)?;
        let body = serde_json::to_string(&document)?;

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(id.to_hex())
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;

        Ok(document)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &ObjectId,
        mut fields: Document,
    ) -> DatabaseResult<UpdateResult> {
        fields.remove(ID_FIELD);
        let id = id.to_hex();

        let modified_count = if fields.is_empty() {
            0
        } else {
            let patch = serde_json::to_string(&fields)?;
            sqlx::query(
                "UPDATE documents SET body = json_patch(body, ?)
                 WHERE collection = ? AND id = ? AND body <> json_patch(body, ?)",
            )
            .bind(&patch)
            .bind(collection)
            .bind(&id)
            .bind(&patch)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?
            .rows_affected()
        };

        let matched_count = if modified_count > 0 {
            modified_count
        } else {
            let exists = sqlx::query("SELECT 1 FROM documents WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(&id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DatabaseError::QueryError(e.to_string()))?;
            u64::from(exists.is_some())
        };

        Ok(UpdateResult {
            matched_count,
            modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, id: &ObjectId) -> DatabaseResult<DeleteResult> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_hex())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        Ok(DeleteResult {
            deleted_count: result.rows_affected(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document_id;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    async fn create_test_store() -> (SqliteDocumentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_documents.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 4,
            ..DatabaseConfig::default()
        };

        let store = SqliteDocumentStore::from_config(&config).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn insert_and_find_by_id() {
        let (store, _temp_dir) = create_test_store().await;

        let created = store
            .insert_one("users", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();
        let id = ObjectId::parse_str(document_id(&created).unwrap()).unwrap();

        let found = store
            .find_one("users", &Filter::by_id(&id))
            .await
            .unwrap()
            .expect("document should exist");
        assert_eq!(found, created);

        let other = store.find_one("organizations", &Filter::by_id(&id)).await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn find_many_filters_scalars_in_insertion_order() {
        let (store, _temp_dir) = create_test_store().await;

        for (name, active, seats) in [("zeta", true, 3), ("alpha", false, 3), ("beta", true, 5)] {
            store
                .insert_one(
                    "organizations",
                    doc(json!({"name": name, "active": active, "seats": seats})),
                )
                .await
                .unwrap();
        }

        let active = store
            .find_many("organizations", &Filter::new().eq("active", true))
            .await
            .unwrap();
        let names: Vec<_> = active.iter().map(|d| d["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["zeta", "beta"]);

        let three_seats = store
            .find_many("organizations", &Filter::new().eq("seats", 3))
            .await
            .unwrap();
        assert_eq!(three_seats.len(), 2);

        let all = store.find_many("organizations", &Filter::new()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn filter_rejects_compound_values() {
        let (store, _temp_dir) = create_test_store().await;

        let error = store
            .find_many("users", &Filter::new().eq("tags", json!(["a"])))
            .await
            .unwrap_err();
        assert!(matches!(error, DatabaseError::QueryError(_)));
    }

    #[tokio::test]
    async fn member_unique_index_maps_to_duplicate() {
        let (store, _temp_dir) = create_test_store().await;

        store
            .insert_one("members", doc(json!({"org_id": "o1", "email": "a@example.com"})))
            .await
            .unwrap();
        store
            .insert_one("members", doc(json!({"org_id": "o2", "email": "a@example.com"})))
            .await
            .unwrap();

        let error = store
            .insert_one("members", doc(json!({"org_id": "o1", "email": "a@example.com"})))
            .await
            .unwrap_err();
        assert!(error.is_duplicate());

        let members = store
            .find_many("members", &Filter::new().eq("org_id", "o1"))
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn user_email_unique_index_applies_to_users_only() {
        let (store, _temp_dir) = create_test_store().await;

        store
            .insert_one("users", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();
        let error = store
            .insert_one("users", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap_err();
        assert!(error.is_duplicate());

        store
            .insert_one("organizations", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_merges_and_counts() {
        let (store, _temp_dir) = create_test_store().await;
        let created = store
            .insert_one("users", doc(json!({"email": "a@example.com", "phone": "1"})))
            .await
            .unwrap();
        let id = ObjectId::parse_str(document_id(&created).unwrap()).unwrap();

        let result = store
            .update_one("users", &id, doc(json!({"phone": "2", "_id": "ignored"})))
            .await
            .unwrap();
        assert_eq!(result, UpdateResult { matched_count: 1, modified_count: 1 });

        let unchanged = store
            .update_one("users", &id, doc(json!({"phone": "2"})))
            .await
            .unwrap();
        assert_eq!(unchanged, UpdateResult { matched_count: 1, modified_count: 0 });

        let found = store.find_one("users", &Filter::by_id(&id)).await.unwrap().unwrap();
        assert_eq!(found["phone"], json!("2"));
        assert_eq!(document_id(&found), Some(id.to_hex().as_str()));

        let missing = store
            .update_one("users", &ObjectId::new(), doc(json!({"phone": "3"})))
            .await
            .unwrap();
        assert_eq!(missing, UpdateResult { matched_count: 0, modified_count: 0 });
    }

    #[tokio::test]
    async fn update_merges_nested_objects_and_removes_nulls() {
        let (store, _temp_dir) = create_test_store().await;
        let created = store
            .insert_one(
                "organizations",
                doc(json!({"name": "acme", "plan": "free", "settings": {"theme": "dark"}})),
            )
            .await
            .unwrap();
        let id = ObjectId::parse_str(document_id(&created).unwrap()).unwrap();

        store
            .update_one(
                "organizations",
                &id,
                doc(json!({"plan": null, "settings": {"locale": "en"}})),
            )
            .await
            .unwrap();

        let found = store
            .find_one("organizations", &Filter::by_id(&id))
            .await
            .unwrap()
            .unwrap();
        assert!(found.get("plan").is_none());
        assert_eq!(found["settings"], json!({"theme": "dark", "locale": "en"}));
    }

    #[tokio::test]
    async fn delete_reports_count() {
        let (store, _temp_dir) = create_test_store().await;
        let created = store
            .insert_one("users", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();
        let id = ObjectId::parse_str(document_id(&created).unwrap()).unwrap();

        assert_eq!(store.delete_one("users", &id).await.unwrap().deleted_count, 1);
        assert_eq!(store.delete_one("users", &id).await.unwrap().deleted_count, 0);
    }
}
