//! User account domain type.

use secrecy::{ExposeSecret, SecretString};

use catalog_core::{Role, Timestamp};

/// A stored user account.
///
/// Only the seeded owner row exists; there is no registration path.
#[derive(Debug, Clone)]
pub struct UserAccount {
    /// Login name (primary key).
    pub username: String,
    /// Stored password, compared by plain equality.
    pub password: SecretString,
    /// Role granted to this account, `None` if the stored value is unknown.
    pub role: Option<Role>,
    /// When the account was created.
    pub created_at: Timestamp,
}

impl UserAccount {
    /// Whether `password` matches and the account holds the owner role.
    #[must_use]
    pub fn accepts_owner_login(&self, password: &str) -> bool {
        self.password.expose_secret() == password && self.role == Some(Role::Owner)
    }
}
