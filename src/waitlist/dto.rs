use serde::{Deserialize, Serialize};

use super::repo_types::SignupRecord;

/// Body of the landing page's `<form>` post.
#[derive(Debug, Default, Deserialize)]
pub struct SignupFormBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub interests: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedSignupResponse {
    pub message: &'static str,
    pub signup: SignupRecord,
}
