//! State of one waitlist form instance: its fields, whether a submission is
//! in flight, and what the user was last told.

use tracing::{error, info, warn};

use super::repo::{InsertError, SignupStore};
use super::repo_types::{ExperienceLevel, SignupRecord};
use super::validation::{validate, SignupInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Confirmed,
}

/// What the user sees after pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Confirmed(SignupRecord),
    Invalid {
        field: &'static str,
        message: &'static str,
    },
    AlreadyListed,
    InvalidInput,
    TryAgainLater,
    Busy,
}

impl Feedback {
    pub fn title(&self) -> &'static str {
        match self {
            Feedback::Confirmed(_) => "You're early.",
            Feedback::Invalid { .. } => "Check your details",
            Feedback::AlreadyListed => "Already signed up",
            Feedback::InvalidInput => "Invalid input",
            Feedback::TryAgainLater => "Something went wrong",
            Feedback::Busy => "Hang on",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Confirmed(_) => "Welcome to the builders list.",
            Feedback::Invalid { message, .. } => message,
            Feedback::AlreadyListed => "This email is already on the waitlist.",
            Feedback::InvalidInput => "Please check your input and try again.",
            Feedback::TryAgainLater => "Please try again later.",
            Feedback::Busy => "Your signup is already being sent.",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Feedback::Confirmed(_) | Feedback::Busy)
    }
}

#[derive(Debug, Clone)]
pub struct CaptureForm {
    pub email: String,
    pub experience: String,
    pub interests: String,
    phase: FormPhase,
}

impl Default for CaptureForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            experience: ExperienceLevel::default().as_str().to_string(),
            interests: String::new(),
            phase: FormPhase::Editing,
        }
    }
}

impl CaptureForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(email: String, experience: String, interests: String) -> Self {
        Self {
            email,
            experience,
            interests,
            phase: FormPhase::Editing,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Editing
    }

    /// Back to an empty, editable form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn input(&self) -> SignupInput {
        SignupInput {
            email: self.email.clone(),
            experience: self.experience.clone(),
            interests: Some(self.interests.clone()),
        }
    }

    /// Validates and, if valid, sends exactly one insert to the store.
    /// Invalid input never reaches the store.
    pub async fn submit(&mut self, store: &dyn SignupStore) -> Feedback {
        if self.phase == FormPhase::Submitting {
            return Feedback::Busy;
        }

        let signup = match validate(self.input()) {
            Ok(s) => s,
            Err(e) => {
                warn!(field = e.field, "waitlist form rejected locally");
                self.phase = FormPhase::Editing;
                return Feedback::Invalid {
                    field: e.field,
                    message: e.message,
                };
            }
        };

        self.phase = FormPhase::Submitting;
        let outcome = store.insert(&signup).await;

        match outcome {
            Ok(record) => {
                info!(id = %record.id, experience = %record.experience, "joined waitlist");
                self.reset();
                self.phase = FormPhase::Confirmed;
                Feedback::Confirmed(record)
            }
            Err(InsertError::Conflict) => {
                warn!("waitlist email already registered");
                self.phase = FormPhase::Editing;
                Feedback::AlreadyListed
            }
            Err(InsertError::ConstraintViolation(msg)) => {
                warn!(reason = %msg, "waitlist insert violated a store constraint");
                self.phase = FormPhase::Editing;
                Feedback::InvalidInput
            }
            Err(InsertError::Other(e)) => {
                error!(error = ?e, "waitlist insert failed");
                self.phase = FormPhase::Editing;
                Feedback::TryAgainLater
            }
        }
    }
}
