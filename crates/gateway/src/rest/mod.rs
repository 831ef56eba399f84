//! REST handlers

pub mod health;
pub mod members;
pub mod organizations;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn create_rest_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/users", post(users::create_user))
        .route(
            "/users/:user_id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/organizations", post(organizations::create_organization))
        .route("/organizations/:org_id", get(organizations::get_organization))
        .route(
            "/organizations/:org_id/members",
            get(members::list_members).post(members::create_member),
        )
}
