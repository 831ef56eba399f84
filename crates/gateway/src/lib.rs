//! # zccore Gateway Crate
//!
//! The HTTP surface: an axum router over the user, organization and
//! membership services. Every response body is a JSON envelope, successes as
//! `{status, message, data}` and failures as `{status, message}`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use zccore_database::MemoryDocumentStore;
//! use zccore_gateway::{build_router, AppState};
//!
//! # async fn run() -> std::io::Result<()> {
//! let state = AppState::new(Arc::new(MemoryDocumentStore::with_default_indexes()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, build_router(state)).await
//! # }
//! ```

pub mod docs;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ApiError, ApiJson, ApiResponse, ErrorResponse};
pub use state::AppState;

use axum::{middleware as axum_middleware, routing::get, Router};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::create_rest_routes())
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .fallback(middleware::route_not_found)
        .with_state(state)
        .layer(axum_middleware::map_response(
            middleware::envelope_method_not_allowed,
        ))
        .layer(middleware::create_trace_middleware())
        .layer(middleware::create_cors_middleware())
}
