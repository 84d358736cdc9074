//! Owner login and the session flag.

use tracing::instrument;

use super::CatalogStore;
use crate::db::UserRepository;
use crate::error::Result;

impl CatalogStore {
    /// Check the owner credential and set the session flag on success.
    ///
    /// Returns `false` (leaving the session untouched) for an unknown user, a
    /// wrong password, or an account without the owner role.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the lookup fails, or
    /// `StoreError::Session` if the flag cannot be written.
    #[instrument(skip(self, password))]
    pub async fn login_owner(&self, username: &str, password: &str) -> Result<bool> {
        let user = UserRepository::new(&self.pool)
            .get_by_username(username)
            .await?;

        let accepted = user.is_some_and(|u| u.accepts_owner_login(password));
        if !accepted {
            tracing::warn!("Owner login rejected");
            return Ok(false);
        }

        self.session.set_logged_in()?;
        tracing::info!("Owner logged in");
        Ok(true)
    }

    /// Clear the session flag. Safe to call when already logged out.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if the session file cannot be written.
    pub fn logout_owner(&self) -> Result<()> {
        self.session.clear_logged_in()?;
        tracing::info!("Owner logged out");
        Ok(())
    }

    /// Whether the owner is logged in.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` or `StoreError::SessionFormat` if the
    /// session file exists but cannot be read.
    pub fn is_owner(&self) -> Result<bool> {
        self.session.is_logged_in()
    }
}
