//! Response envelopes and the mapping from domain errors to HTTP.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;
use zccore_organizations::OrganizationError;
use zccore_users::UserError;

pub const INVALID_ID: &str = "invalid id";
pub const OPERATION_FAILED: &str = "operation failed";
pub const INTERNAL_ERROR: &str = "internal server error";

/// Body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

/// Body of every successful request.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            status: self.status.as_u16(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::InvalidId(raw) => {
                warn!(id = %raw, "rejected malformed user id");
                Self::bad_request(INVALID_ID)
            }
            UserError::UserNotFound => Self::not_found("user does not exist"),
            UserError::EmailAlreadyExists => {
                warn!("email already registered");
                Self::bad_request(OPERATION_FAILED)
            }
            UserError::InvalidEmail => Self::bad_request("email address is not valid"),
            UserError::EmptyUpdate => Self::bad_request("empty/invalid user input data"),
            UserError::Database(e) => {
                error!(error = %e, "user store error");
                Self::internal_server_error(INTERNAL_ERROR)
            }
        }
    }
}

impl From<OrganizationError> for ApiError {
    fn from(error: OrganizationError) -> Self {
        match error {
            OrganizationError::InvalidId(raw) => {
                warn!(id = %raw, "rejected malformed id");
                Self::bad_request(INVALID_ID)
            }
            e @ (OrganizationError::OrganizationNotFound { .. }
            | OrganizationError::UserNotFound { .. }) => {
                warn!(error = %e, "membership request referenced a missing entity");
                Self::bad_request(OPERATION_FAILED)
            }
            OrganizationError::DuplicateMembership { org_id, email } => {
                warn!(org_id = %org_id, email = %email, "duplicate membership rejected");
                Self::conflict("user is already a member of this organization")
            }
            OrganizationError::Validation { message } => Self::bad_request(message),
            OrganizationError::Write(e) => {
                error!(error = %e, "member insert failed");
                Self::internal_server_error("failed to create member")
            }
            OrganizationError::Database(e) => {
                error!(error = %e, "organization store error");
                Self::internal_server_error(INTERNAL_ERROR)
            }
        }
    }
}

/// JSON body extractor whose rejections use the error envelope.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extracted: Result<Json<T>, JsonRejection> = Json::from_request(req, state).await;
        match extracted {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(reason = %rejection.body_text(), "rejected request body");
                Err(ApiError::unprocessable(rejection.body_text()))
            }
        }
    }
}
