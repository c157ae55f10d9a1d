use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{claims::TokenKind, jwt::JwtKeys, repo_types::Session};
use crate::{errors::ApiError, state::AppState};

fn bearer_token(parts: &Parts) -> Option<&str> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
}

/// Resolves the caller's session from the bearer token. Missing, malformed,
/// expired or revoked tokens all mean "not signed in".
pub async fn resolve_session(parts: &Parts, state: &AppState) -> Result<Option<Session>, ApiError> {
    let Some(token) = bearer_token(parts) else {
        return Ok(None);
    };

    let keys = JwtKeys::from_ref(state);
    let claims = match keys.verify(token) {
        Ok(c) if c.kind == TokenKind::Access => c,
        Ok(_) => {
            warn!("refresh token presented as access token");
            return Ok(None);
        }
        Err(_) => {
            warn!("invalid or expired token");
            return Ok(None);
        }
    };

    if !state.identities.session_active(claims.sid).await? {
        warn!(session_id = %claims.sid, "revoked session");
        return Ok(None);
    }

    let Some(user) = state.identities.find_by_id(claims.sub).await? else {
        warn!(user_id = %claims.sub, "token for unknown user");
        return Ok(None);
    };

    let is_admin = state.identities.is_admin(user.id).await?;

    Ok(Some(Session {
        user_id: user.id,
        session_id: claims.sid,
        email: user.email,
        is_admin,
    }))
}

/// The caller's session, if any.
pub struct MaybeSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(resolve_session(parts, state).await?))
    }
}

/// A signed-in caller; rejects with 401 otherwise.
pub struct AuthSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .await?
            .map(AuthSession)
            .ok_or(ApiError::Unauthorized)
    }
}
