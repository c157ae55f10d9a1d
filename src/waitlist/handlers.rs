use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Form, Json, Router,
};
use maud::Markup;
use tracing::{instrument, warn};

use super::{
    dto::{CreatedSignupResponse, SignupFormBody},
    form::{CaptureForm, Feedback},
    validation::SignupInput,
};
use crate::{errors::ApiError, landing, state::AppState};

/// JSON capture endpoint, mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/waitlist", post(join_waitlist))
}

/// Plain HTML form post from the landing page.
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/waitlist", post(submit_waitlist_form))
}

fn feedback_status(feedback: &Feedback) -> StatusCode {
    match feedback {
        Feedback::Confirmed(_) => StatusCode::OK,
        Feedback::Invalid { .. } => StatusCode::BAD_REQUEST,
        Feedback::AlreadyListed => StatusCode::CONFLICT,
        Feedback::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
        Feedback::TryAgainLater | Feedback::Busy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[instrument(skip(state, body))]
pub async fn join_waitlist(
    State(state): State<AppState>,
    body: Result<Json<SignupInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedSignupResponse>), ApiError> {
    let Json(input) = body.map_err(|e| {
        warn!(error = %e, "unreadable waitlist body");
        ApiError::BadRequest(e.body_text())
    })?;
    let mut form = CaptureForm::with_fields(
        input.email,
        input.experience,
        input.interests.unwrap_or_default(),
    );

    let feedback = form.submit(state.signups.as_ref()).await;
    match feedback {
        Feedback::Confirmed(signup) => Ok((
            StatusCode::CREATED,
            Json(CreatedSignupResponse {
                message: "You're early. Welcome to the builders list.",
                signup,
            }),
        )),
        Feedback::Invalid { field, message } => Err(ApiError::Validation {
            field,
            message: message.to_string(),
        }),
        Feedback::AlreadyListed => Err(ApiError::AlreadyOnList),
        Feedback::InvalidInput => Err(ApiError::InvalidInput),
        Feedback::TryAgainLater | Feedback::Busy => Err(ApiError::TryAgainLater),
    }
}

#[instrument(skip(state, body))]
pub async fn submit_waitlist_form(
    State(state): State<AppState>,
    Form(body): Form<SignupFormBody>,
) -> (StatusCode, Markup) {
    let mut form = CaptureForm::with_fields(body.email, body.experience, body.interests);
    let feedback = form.submit(state.signups.as_ref()).await;
    (
        feedback_status(&feedback),
        landing::page::render(&form, Some(&feedback)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{body_json, body_text, send_form, send_json};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn json_signup_is_created_once() {
        let state = AppState::fake();
        let body = json!({ "email": " ada@lovelace.dev ", "experience": "junior", "interests": "" });

        let res = send_json(&state, Method::POST, "/api/v1/waitlist", None, body.clone()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = body_json(res).await;
        assert_eq!(created["signup"]["email"], "ada@lovelace.dev");
        assert_eq!(created["signup"]["experience"], "junior");
        assert_eq!(created["signup"]["interests"], serde_json::Value::Null);
        assert!(created["signup"]["id"].is_string());
        assert!(created["signup"]["created_at"].is_string());

        let res = send_json(&state, Method::POST, "/api/v1/waitlist", None, body).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(res).await["code"], "ALREADY_ON_LIST");
        assert_eq!(state.signups.len(), 1);
    }

    #[tokio::test]
    async fn json_validation_error_names_field_and_skips_store() {
        let state = AppState::fake();
        let res = send_json(
            &state,
            Method::POST,
            "/api/v1/waitlist",
            None,
            json!({ "email": "nope", "experience": "junior" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["field"], "email");
        assert_eq!(body["error"], "Please enter a valid email address");
        assert_eq!(state.signups.insert_calls(), 0);
    }

    #[tokio::test]
    async fn json_null_fields_go_through_validation() {
        let state = AppState::fake();

        let res = send_json(
            &state,
            Method::POST,
            "/api/v1/waitlist",
            None,
            json!({ "email": null, "experience": "junior" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field"], "email");
        assert_eq!(body["error"], "Email is required");

        let res = send_json(
            &state,
            Method::POST,
            "/api/v1/waitlist",
            None,
            json!({ "email": "a@b.co", "experience": null, "interests": null }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(body_json(res).await["signup"]["experience"], "beginner");
    }

    #[tokio::test]
    async fn json_wrong_types_are_a_bad_request_not_invalid_input() {
        let state = AppState::fake();
        let res = send_json(
            &state,
            Method::POST,
            "/api/v1/waitlist",
            None,
            json!({ "email": 42 }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["code"], "BAD_REQUEST");
        assert_eq!(state.signups.insert_calls(), 0);
    }

    #[tokio::test]
    async fn json_store_failure_is_generic() {
        let state = AppState::fake();
        state
            .signups
            .fail_next_insert(crate::waitlist::repo::InsertError::Other(anyhow::anyhow!("timeout")));
        let res = send_json(
            &state,
            Method::POST,
            "/api/v1/waitlist",
            None,
            json!({ "email": "a@b.co" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Something went wrong. Please try again later.");
    }

    #[tokio::test]
    async fn html_form_confirms_and_clears() {
        let state = AppState::fake();
        let res = send_form(
            &state,
            "/waitlist",
            "email=grace%40navy.mil&experience=intermediate&interests=compilers",
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("You&#39;re early.") || html.contains("You're early."));
        assert!(!html.contains("grace@navy.mil"));
        assert_eq!(state.signups.len(), 1);
    }

    #[tokio::test]
    async fn html_form_keeps_fields_on_duplicate() {
        let state = AppState::fake();
        let form = "email=grace%40navy.mil&experience=junior&interests=";
        send_form(&state, "/waitlist", form).await;

        let res = send_form(&state, "/waitlist", form).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let html = body_text(res).await;
        assert!(html.contains("This email is already on the waitlist."));
        assert!(html.contains("value=\"grace@navy.mil\""));
        assert_eq!(state.signups.len(), 1);
    }

    #[tokio::test]
    async fn html_form_reports_invalid_email_without_store_call() {
        let state = AppState::fake();
        let res = send_form(&state, "/waitlist", "email=not-an-email&experience=beginner").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let html = body_text(res).await;
        assert!(html.contains("Please enter a valid email address"));
        assert_eq!(state.signups.insert_calls(), 0);
    }
}
