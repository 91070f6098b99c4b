/**
 * Password Hashing
 *
 * bcrypt wrapper used for at-rest password storage. Hashing is CPU bound,
 * so both directions run on tokio's blocking pool.
 */

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::backend::error::AuthError;

/// Default bcrypt cost
pub const DEFAULT_HASH_COST: u32 = 10;

/// Plaintext hashed once to give unknown-user logins something to compare
const DUMMY_PASSWORD: &str = "twirl-timing-equalizer";

/// bcrypt hasher with a fixed cost factor
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// bcrypt hash in modular crypt format; a bcrypt or task failure is
    /// `AuthError::Fatal`
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::fatal(format!("hashing task failed: {}", e)))?
            .map_err(|e| AuthError::fatal(format!("failed hashing password: {}", e)))
    }

    /// Compare a password against a stored hash
    ///
    /// A corrupt hash and a wrong password both yield `false`.
    pub async fn verify(&self, hash: &str, password: &str) -> bool {
        let hash = hash.to_string();
        let password = password.to_string();

        match tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
            Ok(Ok(valid)) => valid,
            Ok(Err(e)) => {
                tracing::debug!("Password verification failed on stored hash: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }

    /// Build the throwaway hash used by [`Self::verify_dummy`]
    ///
    /// Called once at startup so the first unknown-user login does not pay
    /// for a hash on top of the comparison. Clones share the result.
    pub async fn warm_up(&self) -> Result<(), AuthError> {
        self.dummy_hash
            .get_or_try_init(|| self.hash(DUMMY_PASSWORD))
            .await?;
        Ok(())
    }

    pub fn is_warm(&self) -> bool {
        self.dummy_hash.initialized()
    }

    /// Spend one comparison's worth of work on a throwaway hash
    ///
    /// Lets a login for an unknown user cost the same as a wrong password.
    /// Falls back to building the hash here if [`Self::warm_up`] was skipped.
    pub async fn verify_dummy(&self, password: &str) {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| self.hash(DUMMY_PASSWORD))
            .await;

        match hash {
            Ok(hash) => {
                let _ = self.verify(hash, password).await;
            }
            Err(e) => tracing::warn!("Could not prepare dummy hash: {}", e),
        }
    }
}
