use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use super::repo_types::{ExperienceLevel, NewSignup};

pub const EMAIL_MAX_CHARS: usize = 255;
pub const INTERESTS_MAX_CHARS: usize = 1000;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Raw user input for a waitlist signup, before any checks. `null` and a
/// missing key mean the same thing for every field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default = "default_experience", deserialize_with = "null_as_default_experience")]
    pub experience: String,
    #[serde(default)]
    pub interests: Option<String>,
}

fn default_experience() -> String {
    ExperienceLevel::default().as_str().to_string()
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn null_as_default_experience<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_experience))
}

impl SignupInput {
    /// Trims surrounding whitespace. Case is left untouched.
    pub fn normalize(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            experience: self.experience.trim().to_string(),
            interests: self.interests.map(|s| s.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Normalizes and checks the input, reporting the first failing field.
pub fn validate(input: SignupInput) -> Result<NewSignup, ValidationError> {
    let input = input.normalize();

    if input.email.is_empty() {
        return Err(ValidationError::new("email", "Email is required"));
    }
    if input.email.chars().count() > EMAIL_MAX_CHARS {
        return Err(ValidationError::new(
            "email",
            "Email must be less than 255 characters",
        ));
    }
    if !is_valid_email(&input.email) {
        return Err(ValidationError::new(
            "email",
            "Please enter a valid email address",
        ));
    }

    let experience: ExperienceLevel = input.experience.parse().map_err(|_| {
        ValidationError::new("experience", "Please select a valid experience level")
    })?;

    let interests = input.interests.filter(|s| !s.is_empty());
    if let Some(text) = &interests {
        if text.chars().count() > INTERESTS_MAX_CHARS {
            return Err(ValidationError::new(
                "interests",
                "Interests must be less than 1000 characters",
            ));
        }
    }

    Ok(NewSignup {
        email: input.email,
        experience,
        interests,
    })
}
