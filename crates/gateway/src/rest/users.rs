use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use zccore_users::{CreateUserRequest, UpdateUserRequest, User};

use crate::error::{ApiError, ApiJson, ApiResponse, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            display_name: user.display_name,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<RegisterUserRequest> for CreateUserRequest {
    fn from(request: RegisterUserRequest) -> Self {
        Self {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            display_name: request.display_name,
            phone: request.phone,
        }
    }
}

/// Fields omitted or left blank are not changed.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            display_name: body.display_name,
            phone: body.phone,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedUserResponse {
    pub id: String,
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid or already registered email", body = ErrorResponse),
        (status = 422, description = "Malformed body", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterUserRequest>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state.users().create_user(payload.into()).await?;
    Ok(ApiResponse::created("user created successfully", user.into()))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state.users().get_user(&user_id).await?;
    Ok(ApiResponse::ok("user fetched successfully", user.into()))
}

#[utoipa::path(
    patch,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User id")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed id or nothing to update", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateUserBody>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state.users().update_user(&user_id, payload.into()).await?;
    Ok(ApiResponse::ok("user updated successfully", user.into()))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<DeletedUserResponse>, ApiError> {
    state.users().delete_user(&user_id).await?;
    info!(user_id = %user_id, "user removed via api");
    Ok(ApiResponse::ok(
        "user deleted successfully",
        DeletedUserResponse { id: user_id },
    ))
}
