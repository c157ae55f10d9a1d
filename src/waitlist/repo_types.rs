use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// How far along a signup says they are.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Junior,
    Intermediate,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Junior,
        ExperienceLevel::Intermediate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Intermediate => "intermediate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Intermediate => "Intermediate",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "junior" => Ok(ExperienceLevel::Junior),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            other => anyhow::bail!("unknown experience level: {other}"),
        }
    }
}

/// Row as stored in `waitlist_signups`.
#[derive(Debug, FromRow)]
pub struct SignupRow {
    pub id: Uuid,
    pub email: String,
    pub experience: String,
    pub interests: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A captured waitlist signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRecord {
    pub id: Uuid,
    pub email: String,
    pub experience: ExperienceLevel,
    pub interests: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<SignupRow> for SignupRecord {
    type Error = anyhow::Error;

    fn try_from(r: SignupRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            email: r.email,
            experience: r.experience.parse()?,
            interests: r.interests,
            created_at: r.created_at,
        })
    }
}

/// The client-proposed fields of a signup. Only built by
/// [`crate::waitlist::validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    pub(crate) email: String,
    pub(crate) experience: ExperienceLevel,
    pub(crate) interests: Option<String>,
}

impl NewSignup {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn experience(&self) -> ExperienceLevel {
        self.experience
    }

    pub fn interests(&self) -> Option<&str> {
        self.interests.as_deref()
    }
}
