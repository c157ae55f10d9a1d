use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    export::export_filename,
    filter::{LevelFilter, SignupQuery},
    view::{authorize, AdminView},
};
use crate::{
    auth::extractors::MaybeSession, errors::ApiError, state::AppState,
    waitlist::repo_types::SignupRecord,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/signups", get(list_signups))
        .route("/admin/signups/export", get(export_signups))
        .route("/admin/signups/:id", delete(remove_signup))
}

#[derive(Debug, Serialize)]
pub struct SignupListResponse {
    pub total: usize,
    pub shown: usize,
    pub signups: Vec<SignupRecord>,
}

fn bad_query(e: QueryRejection) -> ApiError {
    ApiError::BadRequest(e.body_text())
}

fn bad_path(e: PathRejection) -> ApiError {
    ApiError::BadRequest(e.body_text())
}

#[instrument(skip(state, session))]
pub async fn list_signups(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    query: Result<Query<SignupQuery>, QueryRejection>,
) -> Result<Json<SignupListResponse>, ApiError> {
    let view = AdminView::open(session, state.signups.as_ref()).await?;
    let Query(q) = query.map_err(bad_query)?;

    let signups = view.visible(&q.q, q.experience);
    Ok(Json(SignupListResponse {
        total: view.total(),
        shown: signups.len(),
        signups,
    }))
}

#[instrument(skip(state, session))]
pub async fn export_signups(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    query: Result<Query<SignupQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let view = AdminView::open(session, state.signups.as_ref()).await?;
    let Query(q) = query.map_err(bad_query)?;

    let csv = view.export(&q.q, q.experience);
    let filename = export_filename(OffsetDateTime::now_utc().date());
    info!(admin = %view.session().email, %filename, "signups exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

#[instrument(skip(state, session))]
pub async fn remove_signup(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SignupListResponse>, ApiError> {
    let session = authorize(session)?;
    let Path(id) = path.map_err(bad_path)?;

    let mut view = AdminView::open(Some(session), state.signups.as_ref()).await?;
    view.delete(id).await?;

    let signups = view.visible("", LevelFilter::All);
    Ok(Json(SignupListResponse {
        total: view.total(),
        shown: signups.len(),
        signups,
    }))
}
