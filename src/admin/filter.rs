use serde::{Deserialize, Deserializer};

use crate::waitlist::repo_types::{ExperienceLevel, SignupRecord};

/// Experience filter of the admin list: everything, or one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Only(ExperienceLevel),
}

impl LevelFilter {
    pub fn matches(&self, level: ExperienceLevel) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Only(wanted) => *wanted == level,
        }
    }
}

impl std::str::FromStr for LevelFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(LevelFilter::All),
            other => Ok(LevelFilter::Only(other.parse()?)),
        }
    }
}

impl<'de> Deserialize<'de> for LevelFilter {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Search term plus level filter, as sent by the admin UI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub experience: LevelFilter,
}

fn matches_search(record: &SignupRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.email.to_lowercase().contains(needle)
        || record
            .interests
            .as_deref()
            .is_some_and(|i| i.to_lowercase().contains(needle))
}

/// Records whose email or interests contain `query` (case-insensitive) and
/// whose experience passes `level`. Order is preserved.
pub fn filter_signups(records: &[SignupRecord], query: &str, level: LevelFilter) -> Vec<SignupRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_search(r, &needle) && level.matches(r.experience))
        .cloned()
        .collect()
}
