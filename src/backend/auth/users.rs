/**
 * Account Model and Secret Store Contract
 *
 * An account is a username plus its bcrypt hash. The store behind it is
 * reached only through the narrow [`SecretStore`] trait so the service, the
 * founder loop and the tests can share any backing implementation.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique username, the natural key of the store
    pub username: String,
    /// bcrypt hash in modular crypt format
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// Errors surfaced by a secret store
#[derive(Debug, Error)]
pub enum StoreError {
    /// An account with this username already exists
    #[error("account already exists")]
    AlreadyExists,

    /// The backing database failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable mapping from username to password hash
///
/// Implementations must give at-most-one-winner semantics for concurrent
/// inserts of the same username: exactly one `insert_if_absent` succeeds,
/// the others get [`StoreError::AlreadyExists`].
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up an account, `None` if absent
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Insert unless the username is taken
    async fn insert_if_absent(&self, account: Account) -> Result<(), StoreError>;

    /// Delete an account; a missing account is not an error
    async fn delete_by_username(&self, username: &str) -> Result<(), StoreError>;

    /// Number of stored accounts
    async fn count_all(&self) -> Result<u64, StoreError>;
}
