//! Admin review of captured signups: list, search, filter, delete, export.

use crate::state::AppState;
use axum::Router;

pub mod export;
pub mod filter;
pub mod handlers;
pub mod view;

pub fn router() -> Router<AppState> {
    handlers::admin_routes()
}
