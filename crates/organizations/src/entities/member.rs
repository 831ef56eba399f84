//! Membership records.
//!
//! A member ties an organization to a user's email. `org_id` holds the
//! organization id as 24-character hex text. `email` is copied from the user
//! when the membership is created and is not refreshed afterwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    pub org_id: String,
    pub email: String,
}

/// A validated membership that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMember {
    pub org_id: String,
    pub email: String,
}
