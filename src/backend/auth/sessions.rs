/**
 * Session Tokens
 *
 * Issues and verifies HS256-signed JWTs binding a username to an expiry.
 * Tokens are stateless: nothing is persisted, and verification never
 * touches the secret store. Confirming the account still exists is the
 * auth service's job.
 *
 * The secret key is wrapped once into [`TokenKeys`] at startup and handed
 * to whoever needs it; no code reads it from the environment afterwards.
 */

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::minutes(5);

/// Prefix expected on the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account the token was issued for
    pub username: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Token-stage failures
#[derive(Debug, Error)]
pub enum TokenError {
    /// Empty input, bad framing or undecodable token
    #[error("malformed token")]
    Malformed,

    /// The MAC did not verify against the process key
    #[error("bad token signature")]
    BadSignature,

    /// The expiry is not strictly in the future
    #[error("token expired")]
    Expired,

    /// Encoding the token failed
    #[error("failed signing token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// `now + ttl` is past the representable date range
    #[error("token expiry out of range")]
    ExpiryOutOfRange,
}

/// Signing material derived from the process secret key
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Build keys from the secret with the default 5 minute lifetime
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL)
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a token for `username`, expiring one TTL from now
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now())
    }

    /// Create a token as if issued at `now`
    ///
    /// Deterministic for a fixed `now`.
    ///
    /// # Arguments
    /// * `username` - Account the token is bound to
    /// * `now` - Issue time, becomes `iat`
    ///
    /// # Returns
    /// Compact JWT string, or `ExpiryOutOfRange` if `now + ttl` overflows
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify a bare token (without the `Bearer ` prefix)
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a bare token against the clock value `now`
    ///
    /// # Arguments
    /// * `token` - JWT without the `Bearer ` prefix
    /// * `now` - Clock value the expiry is compared against
    ///
    /// # Returns
    /// Decoded claims if the signature verifies and `exp > now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Malformed);
        }

        // Expiry is checked below with no leeway; the library only checks
        // that `exp` is present.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

/// Strip the `Bearer ` framing from an `Authorization` header value
///
/// Returns `None` if the header is blank, unframed, or carries an empty
/// token after the prefix.
pub fn strip_bearer(header: &str) -> Option<&str> {
    let token = header.trim().strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
