use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{NewSignup, SignupRecord, SignupRow};

/// Why the store refused an insert.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("email already on the waitlist")]
    Conflict,
    #[error("store rejected the record: {0}")]
    ConstraintViolation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistence for waitlist signups. The store owns ids, timestamps and
/// email uniqueness.
#[async_trait]
pub trait SignupStore: Send + Sync {
    async fn insert(&self, signup: &NewSignup) -> Result<SignupRecord, InsertError>;
    async fn list_newest_first(&self) -> anyhow::Result<Vec<SignupRecord>>;
    /// Returns `false` when no record had that id.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgSignupStore {
    db: PgPool,
}

impl PgSignupStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

// SQLSTATE classes: 23505 unique_violation, 23514 check_violation,
// 23502 not_null_violation, 22001 string_data_right_truncation.
fn classify_insert_error(e: sqlx::Error) -> InsertError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            Some("23505") => return InsertError::Conflict,
            Some("23514") | Some("23502") | Some("22001") => {
                return InsertError::ConstraintViolation(db_err.message().to_string())
            }
            _ => {}
        }
    }
    InsertError::Other(anyhow::Error::new(e).context("insert waitlist signup"))
}

#[async_trait]
impl SignupStore for PgSignupStore {
    async fn insert(&self, signup: &NewSignup) -> Result<SignupRecord, InsertError> {
        let row = sqlx::query_as::<_, SignupRow>(
            r#"
            INSERT INTO waitlist_signups (email, experience, interests)
            VALUES ($1, $2, $3)
            RETURNING id, email, experience, interests, created_at
            "#,
        )
        .bind(signup.email())
        .bind(signup.experience().as_str())
        .bind(signup.interests())
        .fetch_one(&self.db)
        .await
        .map_err(classify_insert_error)?;

        debug!(id = %row.id, "waitlist signup inserted");
        Ok(SignupRecord::try_from(row)?)
    }

    async fn list_newest_first(&self) -> anyhow::Result<Vec<SignupRecord>> {
        let rows = sqlx::query_as::<_, SignupRow>(
            r#"
            SELECT id, email, experience, interests, created_at
              FROM waitlist_signups
             ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list waitlist signups")?;

        rows.into_iter().map(SignupRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM waitlist_signups WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete waitlist signup {id}"))?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_other() {
        match classify_insert_error(sqlx::Error::RowNotFound) {
            InsertError::Other(e) => assert!(e.to_string().contains("insert waitlist signup")),
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
