/**
 * Auth Service
 *
 * Composes validation, the secret store, password hashing and token
 * handling into the three operations exposed to the transport layer:
 *
 * - `check` - verify a bearer header and confirm the account still exists
 * - `login` - exchange username/password for a token
 * - `register` - create an account, sponsored by a currently valid token
 *
 * Store calls made here are bounded by `store_timeout`; exceeding it yields
 * `AuthError::Timeout` and the in-flight call is dropped. The service holds
 * no locks of its own. Concurrent registrations of the same username are
 * settled by the store, and the loser sees `AlreadyExists`.
 */

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::{strip_bearer, Claims, TokenKeys};
use crate::backend::auth::users::{Account, SecretStore, StoreError};
use crate::backend::error::{AuthError, LOGIN_FAILED_MESSAGE};
use crate::shared::validators::{validate_password, validate_username};

/// Default deadline for request-scoped store calls
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(1);

/// Credential lifecycle orchestrator
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn SecretStore>,
    keys: TokenKeys,
    hasher: PasswordHasher,
    store_timeout: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn SecretStore>, keys: TokenKeys, hasher: PasswordHasher) -> Self {
        Self {
            store,
            keys,
            hasher,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<dyn SecretStore> {
        &self.store
    }

    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Validate an `Authorization` header value
    ///
    /// The `Bearer ` framing is checked before the signature. A verified
    /// token is only accepted while its account still exists.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, e.g. `Bearer eyJ...`
    ///
    /// # Returns
    /// Claims of the verified token
    pub async fn check(&self, authorization: &str) -> Result<Claims, AuthError> {
        if authorization.trim().is_empty() {
            return Err(AuthError::invalid_input("no token provided"));
        }
        let token =
            strip_bearer(authorization).ok_or_else(|| AuthError::invalid_input("invalid token"))?;

        let claims = self.keys.verify(token).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AuthError::from(e)
        })?;

        let account = self
            .bounded(self.store.find_by_username(&claims.username))
            .await?;
        if account.is_none() {
            tracing::warn!("Token presented for missing account: {}", claims.username);
            return Err(AuthError::not_found("user not found"));
        }

        Ok(claims)
    }

    /// Exchange credentials for a token
    ///
    /// Inputs are only trimmed; accounts created under older rules can
    /// still log in. Unknown user and wrong password render the same
    /// client message and both cost one hash comparison.
    ///
    /// # Returns
    /// Signed token valid for the configured TTL
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = username.trim();
        let password = password.trim();

        let account = self.bounded(self.store.find_by_username(username)).await?;
        let Some(account) = account else {
            self.hasher.verify_dummy(password).await;
            tracing::warn!("Login for unknown user: {}", username);
            return Err(AuthError::not_found(LOGIN_FAILED_MESSAGE));
        };

        if !self.hasher.verify(&account.password_hash, password).await {
            tracing::warn!("Invalid password for user: {}", username);
            return Err(AuthError::InvalidCredential);
        }

        let token = self.keys.issue(&account.username)?;
        tracing::info!("User logged in: {}", account.username);
        Ok(token)
    }

    /// Create an account on behalf of a sponsor
    ///
    /// The sponsor token is checked before anything else, so a rejected
    /// sponsor never causes a store mutation.
    ///
    /// # Arguments
    /// * `authorization` - Sponsor's `Authorization` header value
    /// * `username` - Requested username, trimmed and validated
    /// * `password` - Requested password, trimmed and validated
    ///
    /// # Returns
    /// `Ok(())` once the account is stored; `AlreadyExists` if the name is
    /// taken, including when a concurrent registration wins the insert
    pub async fn register(
        &self,
        authorization: &str,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let sponsor = self.check(authorization).await?;

        let username = validate_username(username)?;
        let password = validate_password(password)?;

        let existing = self
            .bounded(self.store.find_by_username(username.as_str()))
            .await?;
        if existing.is_some() {
            tracing::warn!("Username already exists: {}", username);
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = self.hasher.hash(password.as_str()).await?;

        self.bounded(
            self.store
                .insert_if_absent(Account::new(username.as_str(), password_hash)),
        )
        .await?;

        tracing::info!("User {} registered by sponsor {}", username, sponsor.username);
        Ok(())
    }

    /// Run a store call under the request deadline
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, AuthError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result.map_err(AuthError::from),
            Err(_) => {
                tracing::warn!("Secret store call exceeded {:?}", self.store_timeout);
                Err(AuthError::Timeout)
            }
        }
    }
}
