use serde::{Deserialize, Serialize};
use zccore_database::Document;

/// A stored organization. Only `_id` is required; organizations written by
/// other services may carry none of the known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_email: Option<String>,
    #[serde(default)]
    pub created_at: String,
    /// Attributes not modelled here, kept as stored.
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrganization {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_email: Option<String>,
    pub created_at: String,
}

/// Request for creating an organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator_email: Option<String>,
}
