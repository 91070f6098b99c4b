/**
 * Founder Bootstrap
 *
 * Makes sure a privileged founder account exists exactly while the store
 * holds no other account, so the first sponsor token can be obtained
 * without a separate provisioning step.
 *
 * # Cycle
 *
 * 1. Delete the founder account, if any
 * 2. Count accounts; if there are any, the loop is `Steady` and stops
 * 3. Otherwise hash the founder password and insert the founder
 * 4. Sleep, then start over
 *
 * Store calls here have no deadline. Any store failure ends the loop with
 * an error, which the server treats as fatal.
 */

use std::sync::Arc;
use std::time::Duration;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::users::{Account, SecretStore, StoreError};
use crate::backend::error::AuthError;

/// Default pause between seeding cycles
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Where the bootstrap loop stands after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// The store held no other account; the founder was (re)created
    Seeding,
    /// Real accounts exist; the founder is gone for good
    Steady,
}

/// Background task seeding the founder account
#[derive(Clone)]
pub struct FounderBootstrap {
    store: Arc<dyn SecretStore>,
    hasher: PasswordHasher,
    username: String,
    password: String,
    interval: Duration,
}

impl FounderBootstrap {
    pub fn new(
        store: Arc<dyn SecretStore>,
        hasher: PasswordHasher,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            store,
            hasher,
            username: username.into(),
            password: password.into(),
            interval: DEFAULT_RECHECK_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one delete/count/seed cycle
    ///
    /// # Returns
    /// `Seeding` if the founder was (re)inserted, `Steady` if other
    /// accounts exist and the founder is gone
    pub async fn cycle(&self) -> Result<BootstrapState, AuthError> {
        self.store.delete_by_username(&self.username).await?;

        let count = self.store.count_all().await?;
        if count > 0 {
            tracing::info!(accounts = count, "Accounts exist, founder not needed");
            return Ok(BootstrapState::Steady);
        }

        let password_hash = self.hasher.hash(&self.password).await?;
        match self
            .store
            .insert_if_absent(Account::new(self.username.as_str(), password_hash))
            .await
        {
            Ok(()) => tracing::info!("Founder account {} seeded", self.username),
            // someone registered the name between our count and insert
            Err(StoreError::AlreadyExists) => {
                tracing::warn!("Founder name {} taken during seeding", self.username)
            }
            Err(e) => return Err(e.into()),
        }

        Ok(BootstrapState::Seeding)
    }

    /// Cycle until the store reaches `Steady`
    ///
    /// Returns only on `Steady` or on a store failure.
    pub async fn run(self) -> Result<(), AuthError> {
        loop {
            if self.cycle().await? == BootstrapState::Steady {
                tracing::info!("Founder bootstrap finished");
                return Ok(());
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
