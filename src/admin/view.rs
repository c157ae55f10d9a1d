use tracing::{error, info, warn};
use uuid::Uuid;

use super::export::export_csv;
use super::filter::{filter_signups, LevelFilter};
use crate::auth::repo_types::Session;
use crate::errors::ApiError;
use crate::waitlist::repo::SignupStore;
use crate::waitlist::repo_types::SignupRecord;

/// Checks that the caller may see signup data at all. Nothing is loaded
/// before this passes.
pub fn authorize(session: Option<Session>) -> Result<Session, ApiError> {
    let Some(session) = session else {
        return Err(ApiError::Unauthorized);
    };
    if !session.is_admin {
        warn!(user_id = %session.user_id, "non-admin tried to open the waitlist dashboard");
        return Err(ApiError::Forbidden);
    }
    Ok(session)
}

/// The admin's working copy of the signup list, newest first.
pub struct AdminView<'a> {
    session: Session,
    store: &'a dyn SignupStore,
    records: Vec<SignupRecord>,
}

impl<'a> AdminView<'a> {
    /// Authorizes, then fetches the list. A failed fetch is reported and
    /// leaves no view behind.
    pub async fn open(session: Option<Session>, store: &'a dyn SignupStore) -> Result<AdminView<'a>, ApiError> {
        let session = authorize(session)?;
        let records = store.list_newest_first().await.map_err(|e| {
            error!(error = ?e, "failed to load signups");
            ApiError::Internal(e.context("Failed to load signups."))
        })?;
        info!(admin = %session.email, count = records.len(), "signups loaded");
        Ok(AdminView {
            session,
            store,
            records,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn records(&self) -> &[SignupRecord] {
        &self.records
    }

    pub fn visible(&self, query: &str, level: LevelFilter) -> Vec<SignupRecord> {
        filter_signups(&self.records, query, level)
    }

    /// Removes one signup from the store, then from the local list. On
    /// failure the local list is untouched.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), ApiError> {
        let removed = self.store.delete(id).await.map_err(|e| {
            error!(error = ?e, %id, "failed to delete signup");
            ApiError::Internal(e.context("Failed to delete signup."))
        })?;
        if !removed {
            warn!(%id, "delete of unknown signup");
            return Err(ApiError::NotFound);
        }
        self.records.retain(|r| r.id != id);
        info!(admin = %self.session.email, %id, "signup removed");
        Ok(())
    }

    /// CSV of the currently filtered list.
    pub fn export(&self, query: &str, level: LevelFilter) -> String {
        export_csv(&self.visible(query, level))
    }
}
