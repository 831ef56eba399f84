use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zccore_organizations::Member;

use crate::error::{ApiError, ApiJson, ApiResponse, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub id: String,
    pub org_id: String,
    pub email: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            org_id: member.org_id,
            email: member.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    #[serde(default)]
    pub user_id: String,
}

#[utoipa::path(
    post,
    path = "/organizations/{org_id}/members",
    tag = "Members",
    params(("org_id" = String, Path, description = "Organization id")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = MemberResponse),
        (status = 400, description = "Malformed id, or organization or user missing", body = ErrorResponse),
        (status = 409, description = "User is already a member", body = ErrorResponse),
        (status = 500, description = "Member could not be written", body = ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    ApiJson(payload): ApiJson<AddMemberRequest>,
) -> Result<ApiResponse<MemberResponse>, ApiError> {
    let member = state
        .memberships()
        .create_membership(&org_id, &payload.user_id)
        .await?;
    Ok(ApiResponse::created(
        "member added to organization",
        member.into(),
    ))
}

#[utoipa::path(
    get,
    path = "/organizations/{org_id}/members",
    tag = "Members",
    params(("org_id" = String, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Members of the organization", body = [MemberResponse]),
        (status = 400, description = "Malformed id or organization missing", body = ErrorResponse)
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<ApiResponse<Vec<MemberResponse>>, ApiError> {
    let members = state.memberships().list_members(&org_id).await?;
    Ok(ApiResponse::ok(
        "members fetched successfully",
        members.into_iter().map(MemberResponse::from).collect(),
    ))
}
