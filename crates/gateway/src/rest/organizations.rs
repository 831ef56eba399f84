use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zccore_organizations::{CreateOrganizationRequest, Organization, OrganizationError};

use crate::error::{ApiError, ApiJson, ApiResponse, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_email: Option<String>,
    pub created_at: String,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            description: organization.description,
            creator_email: organization.creator_email,
            created_at: organization.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrganizationBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator_email: Option<String>,
}

#[utoipa::path(
    post,
    path = "/organizations",
    tag = "Organizations",
    request_body = CreateOrganizationBody,
    responses(
        (status = 201, description = "Organization created", body = OrganizationResponse),
        (status = 400, description = "Missing name or invalid creator email", body = ErrorResponse)
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateOrganizationBody>,
) -> Result<ApiResponse<OrganizationResponse>, ApiError> {
    let organization = state
        .organizations()
        .create_organization(CreateOrganizationRequest {
            name: payload.name,
            description: payload.description,
            creator_email: payload.creator_email,
        })
        .await?;
    Ok(ApiResponse::created(
        "organization created successfully",
        organization.into(),
    ))
}

#[utoipa::path(
    get,
    path = "/organizations/{org_id}",
    tag = "Organizations",
    params(("org_id" = String, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization found", body = OrganizationResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such organization", body = ErrorResponse)
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<ApiResponse<OrganizationResponse>, ApiError> {
    let organization = state
        .organizations()
        .get_organization(&org_id)
        .await
        .map_err(|e| match e {
            OrganizationError::OrganizationNotFound { .. } => {
                ApiError::not_found("organization does not exist")
            }
            other => ApiError::from(other),
        })?;
    Ok(ApiResponse::ok(
        "organization fetched successfully",
        organization.into(),
    ))
}
