//! # todo-api
//!
//! HTTP surface of the Todo List service: the `/api/v1/tasks` endpoints, the
//! generated OpenAPI document and its docs pages.
//!
//! Each handler receives its own database session through [`extract::DbSession`]
//! and maps failures to JSON bodies through [`error::ApiError`].

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the application router over `state`.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ]);

    Router::new()
        .nest(todo_schema::openapi::API_PREFIX, routes::tasks::routes())
        .merge(routes::docs::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
