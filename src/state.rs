use crate::auth::repo::{IdentityStore, PgIdentityStore};
use crate::config::AppConfig;
use crate::waitlist::repo::{PgSignupStore, SignupStore};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub signups: Arc<dyn SignupStore>,
    pub identities: Arc<dyn IdentityStore>,
}

impl AppState {
    /// Reads config from the environment and connects to Postgres.
    pub async fn init() -> anyhow::Result<(Self, PgPool)> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;

        Ok((Self::from_pool(db.clone(), config), db))
    }

    pub fn from_pool(db: PgPool, config: Arc<AppConfig>) -> Self {
        Self::from_parts(
            config,
            Arc::new(PgSignupStore::new(db.clone())),
            Arc::new(PgIdentityStore::new(db)),
        )
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        signups: Arc<dyn SignupStore>,
        identities: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            config,
            signups,
            identities,
        }
    }
}
