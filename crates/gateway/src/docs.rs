use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::rest::health::health_check,
        crate::rest::users::create_user,
        crate::rest::users::get_user,
        crate::rest::users::update_user,
        crate::rest::users::delete_user,
        crate::rest::organizations::create_organization,
        crate::rest::organizations::get_organization,
        crate::rest::members::create_member,
        crate::rest::members::list_members
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::rest::health::HealthStatus,
            crate::rest::users::UserResponse,
            crate::rest::users::RegisterUserRequest,
            crate::rest::users::UpdateUserBody,
            crate::rest::users::DeletedUserResponse,
            crate::rest::organizations::OrganizationResponse,
            crate::rest::organizations::CreateOrganizationBody,
            crate::rest::members::MemberResponse,
            crate::rest::members::AddMemberRequest
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Users", description = "User registration and profiles"),
        (name = "Organizations", description = "Organization management"),
        (name = "Members", description = "Organization membership")
    )
)]
pub struct ApiDoc;

/// Successful responses wrap the documented bodies in `{status, message, data}`.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
