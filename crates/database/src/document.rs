//! Documents, identifiers and equality filters shared by every store.

use bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{DatabaseError, DatabaseResult};

/// A schema-free JSON object as stored in a collection.
pub type Document = Map<String, Value>;

/// Field holding the document identifier.
pub const ID_FIELD: &str = "_id";

/// Collection names used by the backend.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ORGANIZATIONS: &str = "organizations";
    pub const MEMBERS: &str = "members";
}

/// Parse a textual identifier into the store's identifier format.
///
/// ```
/// use zccore_database::parse_object_id;
///
/// assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
/// assert!(parse_object_id("not-a-valid-id").is_err());
/// ```
pub fn parse_object_id(raw: &str) -> DatabaseResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| DatabaseError::InvalidId(raw.to_string()))
}

/// Serialize an entity into a document.
pub fn to_document<T: Serialize>(value: &T) -> DatabaseResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(DatabaseError::Serialization(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Decode a stored document into an entity.
pub fn from_document<T: DeserializeOwned>(document: Document) -> DatabaseResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Read the identifier of a stored document.
pub fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

/// Conjunction of field equality conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter that matches every document of a collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &ObjectId) -> Self {
        Self::new().eq(ID_FIELD, id.to_hex())
    }

    /// Add an equality condition. A later condition on the same field replaces the earlier one.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.conditions.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = value,
            None => self.conditions.push((field, value)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    /// Whether `document` satisfies every condition. A null condition also matches a missing field.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| match document.get(field) {
                Some(actual) => actual == expected,
                None => expected.is_null(),
            })
    }
}

/// Ensure the document carries a valid `_id`, generating one when absent.
pub(crate) fn assign_id(document: &mut Document) -> DatabaseResult<ObjectId> {
    let id = match document.get(ID_FIELD) {
        Some(Value::String(raw)) => parse_object_id(raw)?,
        Some(other) => return Err(DatabaseError::InvalidId(other.to_string())),
        None => ObjectId::new(),
    };
    document.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
    Ok(id)
}

/// Apply `patch` to `target` as a JSON merge patch (RFC 7396), leaving `_id` untouched.
pub(crate) fn merge_patch(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        if key == ID_FIELD {
            continue;
        }
        match value {
            Value::Null => {
                target.remove(&key);
            }
            Value::Object(inner) => {
                let entry = target
                    .entry(key)
                    .or_insert_with(|| Value::Object(Document::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Document::new());
                }
                if let Value::Object(existing) = entry {
                    merge_patch(existing, inner);
                }
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn filter_matches_all_conditions() {
        let document = doc(json!({"org_id": "abc", "email": "a@example.com"}));

        assert!(Filter::new().matches(&document));
        assert!(Filter::new().eq("org_id", "abc").matches(&document));
        assert!(Filter::new()
            .eq("org_id", "abc")
            .eq("email", "a@example.com")
            .matches(&document));
        assert!(!Filter::new()
            .eq("org_id", "abc")
            .eq("email", "b@example.com")
            .matches(&document));
    }

    #[test]
    fn filter_null_matches_missing_field() {
        let document = doc(json!({"email": "a@example.com"}));

        assert!(Filter::new().eq("phone", Value::Null).matches(&document));
        assert!(!Filter::new().eq("phone", "123").matches(&document));
    }

    #[test]
    fn filter_eq_replaces_previous_condition() {
        let filter = Filter::new().eq("email", "a@example.com").eq("email", "b@example.com");

        assert_eq!(filter.iter().count(), 1);
        assert_eq!(filter.iter().next().map(|(_, v)| v.clone()), Some(json!("b@example.com")));
    }

    #[test]
    fn by_id_uses_hex_identifier() {
        let id = parse_object_id("507f1f77bcf86cd799439011").unwrap();
        let filter = Filter::by_id(&id);

        assert!(filter.matches(&doc(json!({"_id": "507f1f77bcf86cd799439011"}))));
    }

    #[test]
    fn parse_object_id_rejects_malformed_text() {
        assert!(matches!(
            parse_object_id("not-a-valid-id"),
            Err(DatabaseError::InvalidId(raw)) if raw == "not-a-valid-id"
        ));
        assert!(parse_object_id("").is_err());
        assert!(parse_object_id("507f1f77bcf86cd79943901").is_err());
    }

    #[test]
    fn assign_id_keeps_valid_and_generates_missing() {
        let mut supplied = doc(json!({"_id": "507f1f77bcf86cd799439011"}));
        let id = assign_id(&mut supplied).unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");

        let mut generated = doc(json!({"name": "acme"}));
        let id = assign_id(&mut generated).unwrap();
        assert_eq!(document_id(&generated), Some(id.to_hex().as_str()));

        let mut invalid = doc(json!({"_id": 42}));
        assert!(assign_id(&mut invalid).is_err());
    }

    #[test]
    fn merge_patch_sets_removes_and_protects_id() {
        let mut target = doc(json!({
            "_id": "507f1f77bcf86cd799439011",
            "email": "a@example.com",
            "phone": "123",
            "profile": {"city": "Lagos"}
        }));
        let patch = doc(json!({
            "_id": "5f9d88b9d2c1b814b4d6f3a1",
            "email": "b@example.com",
            "phone": null,
            "profile": {"country": "NG"}
        }));

        merge_patch(&mut target, patch);

        assert_eq!(
            Value::Object(target),
            json!({
                "_id": "507f1f77bcf86cd799439011",
                "email": "b@example.com",
                "profile": {"city": "Lagos", "country": "NG"}
            })
        );
    }

    #[test]
    fn to_document_rejects_non_objects() {
        assert!(to_document(&"plain string").is_err());
        assert!(to_document(&json!({"name": "acme"})).is_ok());
    }
}
