use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{AppRole, User};

/// Accounts, roles and server-side sessions.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find a user by (already lowercased) email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Returns `None` when the email is already taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<Option<User>>;
    async fn is_admin(&self, user_id: Uuid) -> anyhow::Result<bool>;
    async fn open_session(&self, user_id: Uuid) -> anyhow::Result<Uuid>;
    async fn session_active(&self, session_id: Uuid) -> anyhow::Result<bool>;
    async fn revoke_session(&self, session_id: Uuid) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgIdentityStore {
    db: PgPool,
}

impl PgIdentityStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
        .context("create user")?;
        Ok(user)
    }

    async fn is_admin(&self, user_id: Uuid) -> anyhow::Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(AppRole::Admin.as_str())
        .fetch_one(&self.db)
        .await
        .context("lookup user role")?;
        Ok(exists)
    }

    async fn open_session(&self, user_id: Uuid) -> anyhow::Result<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"INSERT INTO auth_sessions (user_id) VALUES ($1) RETURNING id"#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .context("open session")?;
        Ok(id)
    }

    async fn session_active(&self, session_id: Uuid) -> anyhow::Result<bool> {
        let (active,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM auth_sessions WHERE id = $1 AND revoked_at IS NULL
            )
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.db)
        .await
        .context("check session")?;
        Ok(active)
    }

    async fn revoke_session(&self, session_id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"UPDATE auth_sessions SET revoked_at = now() WHERE id = $1 AND revoked_at IS NULL"#,
        )
        .bind(session_id)
        .execute(&self.db)
        .await
        .context("revoke session")?;
        Ok(())
    }
}
