mod dto;
pub mod form;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod validation;

use crate::state::AppState;
use axum::Router;

/// JSON routes, nested under `/api/v1`.
pub fn router() -> Router<AppState> {
    handlers::api_routes()
}

/// Routes served next to the landing page.
pub fn page_router() -> Router<AppState> {
    handlers::page_routes()
}
