/**
 * Secret Store Implementations
 *
 * - [`PgAccountStore`] keeps accounts in PostgreSQL. The primary key on
 *   `username` settles concurrent inserts: `ON CONFLICT DO NOTHING` affects
 *   zero rows for the loser.
 * - [`MemoryAccountStore`] keeps accounts in process memory. Check and
 *   insert happen under one write guard, which gives the same rule.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::backend::auth::users::{Account, SecretStore, StoreError};

/// PostgreSQL-backed secret store
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the schema in `migrations/`
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }
}

#[async_trait]
impl SecretStore for PgAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT username, password_hash, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn insert_if_absent(&self, account: Account) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists);
        }
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM accounts WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}

/// In-process secret store
///
/// Used when no database is configured, and by the tests.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecretStore for MemoryAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn insert_if_absent(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) {
            return Err(StoreError::AlreadyExists);
        }
        accounts.insert(account.username.clone(), account);
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> Result<(), StoreError> {
        self.accounts.write().await.remove(username);
        Ok(())
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        Ok(self.accounts.read().await.len() as u64)
    }
}
