//! Owner session commands.

use serde_json::json;

use catalog_store::CatalogStore;

use super::{CommandError, emit};

/// Log in as the owner. A rejected login is reported, not treated as a failure.
pub async fn login(store: &CatalogStore, username: &str, password: &str) -> Result<(), CommandError> {
    let logged_in = store.login_owner(username, password).await?;
    if !logged_in {
        tracing::warn!(%username, "Invalid credentials");
    }
    emit(&json!({ "logged_in": logged_in }))
}

/// Clear the owner session.
pub fn logout(store: &CatalogStore) -> Result<(), CommandError> {
    store.logout_owner()?;
    emit(&json!({ "logged_in": false }))
}

/// Report the session state.
pub fn whoami(store: &CatalogStore) -> Result<(), CommandError> {
    let owner = store.is_owner()?;
    emit(&json!({ "owner": owner }))
}
