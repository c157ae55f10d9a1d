use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest, SignOutResponse},
        extractors::AuthSession,
        jwt::JwtKeys,
        password::{check_password, hash_password, verify_password},
        repo_types::User,
    },
    errors::ApiError,
    state::AppState,
    waitlist::validation::is_valid_email,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

async fn issue_tokens(state: &AppState, user: User, session_id: Uuid) -> Result<AuthResponse, ApiError> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(user.id, session_id)?;
    let refresh_token = keys.sign_refresh(user.id, session_id)?;
    let is_admin = state.identities.is_admin(user.id).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            is_admin,
        },
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    if let Err(reason) = check_password(&payload.password) {
        warn!(reason, "weak password refused");
        return Err(ApiError::BadRequest(reason.into()));
    }

    let hash = hash_password(&payload.password)?;

    let Some(user) = state.identities.create_user(&payload.email, &hash).await? else {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    };

    let session_id = state.identities.open_session(user.id).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(issue_tokens(&state, user, session_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    let Some(user) = state.identities.find_by_email(&payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let session_id = state.identities.open_session(user.id).await?;
    info!(user_id = %user.id, %session_id, "user logged in");
    Ok(Json(issue_tokens(&state, user, session_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        ApiError::Unauthorized
    })?;

    if !state.identities.session_active(claims.sid).await? {
        warn!(session_id = %claims.sid, "refresh on revoked session");
        return Err(ApiError::Unauthorized);
    }

    let user = state
        .identities
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(issue_tokens(&state, user, claims.sid).await?))
}

#[instrument(skip(state, session), fields(user_id = %session.user_id))]
pub async fn logout(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<SignOutResponse>, ApiError> {
    state.identities.revoke_session(session.session_id).await?;
    info!(session_id = %session.session_id, "signed out");
    Ok(Json(SignOutResponse { redirect_to: "/" }))
}

#[instrument(skip(session), fields(user_id = %session.user_id))]
pub async fn get_me(AuthSession(session): AuthSession) -> Json<PublicUser> {
    Json(PublicUser {
        id: session.user_id,
        email: session.email,
        is_admin: session.is_admin,
    })
}
