use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Errors surfaced by the HTTP layer. Every variant maps to a fixed,
/// user-facing message; store internals never reach the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("This email is already on the waitlist.")]
    AlreadyOnList,
    #[error("Please check your input and try again.")]
    InvalidInput,
    #[error("Something went wrong. Please try again later.")]
    TryAgainLater,
    #[error("{0}")]
    BadRequest(String),
    #[error("Sign in required")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Conflict(String),
    #[error("Access denied: you don't have admin permissions.")]
    Forbidden,
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AlreadyOnList | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::TryAgainLater => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::AlreadyOnList => "ALREADY_ON_LIST",
            ApiError::InvalidInput => "INVALID_INPUT",
            ApiError::TryAgainLater => "TRY_AGAIN_LATER",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(e) => {
                error!(error = ?e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: message,
            code: self.code(),
            field: match &self {
                ApiError::Validation { field, .. } => Some(*field),
                _ => None,
            },
            redirect_to: match &self {
                ApiError::Unauthorized => Some("/api/v1/auth/login"),
                ApiError::Forbidden => Some("/"),
                _ => None,
            },
        };

        let mut res = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::body_text;

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused on 10.0.0.3"));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_text(res).await;
        assert!(!body.contains("10.0.0.3"));
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[test]
    fn unauthorized_carries_bearer_challenge() {
        let res = ApiError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn store_outcomes_have_distinct_statuses() {
        assert_eq!(ApiError::AlreadyOnList.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::InvalidInput.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::TryAgainLater.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ApiError::Forbidden.code(), "FORBIDDEN");
    }
}
