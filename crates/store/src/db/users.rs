//! User repository for database operations.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::{SqliteConnection, SqlitePool};

use catalog_core::{Role, Timestamp};

use crate::models::UserAccount;

/// Internal row type for `users` queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    username: String,
    password: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        let role = match row.role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!(username = %row.username, error = %e, "Unknown role on user row");
                None
            }
        };

        Self {
            username: row.username,
            password: SecretString::from(row.password),
            role,
            created_at: row.created_at,
        }
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query fails.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT username, password, role, created_at
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Count stored accounts.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query fails.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
    }
}

/// Insert a user row on an open connection (used while seeding the schema).
///
/// # Errors
///
/// Returns `sqlx::Error` if the insert fails, including a duplicate username.
pub async fn insert_user(
    conn: &mut SqliteConnection,
    username: &str,
    password: &SecretString,
    role: Role,
    created_at: Timestamp,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO users (username, password, role, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ",
    )
    .bind(username)
    .bind(password.expose_secret())
    .bind(role.as_str())
    .bind(created_at)
    .execute(conn)
    .await?;

    Ok(())
}
