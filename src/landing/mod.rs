use axum::{routing::get, Router};
use maud::Markup;

use crate::state::AppState;
use crate::waitlist::form::CaptureForm;

mod content;
pub mod page;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

async fn home() -> Markup {
    page::render(&CaptureForm::new(), None)
}
