/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the credential service.
 * Every failure that can leave the auth service is one `AuthError` variant;
 * the HTTP status, application code and client message are derived from
 * the variant only at the transport boundary.
 *
 * # Error Categories
 *
 * ## Client errors (400 class)
 *
 * - `InvalidInput` - malformed or missing fields, bad header framing
 * - `WeakCredential` - password below the entropy bar
 * - `InvalidCredential` - wrong password
 * - `NotFound` - no such account
 * - `AlreadyExists` - username taken
 * - `InvalidToken` - any token-stage failure (see `TokenError`)
 *
 * ## Server errors (500 class)
 *
 * - `Timeout` - a store call exceeded its deadline; safe to retry
 * - `Fatal` - the service cannot function (store unreachable, signing
 *   failure); escalated so the process stops
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::users::StoreError;
use crate::shared::SharedError;

/// Application code carried in every error body
///
/// Always zero for now; reserved for finer-grained codes.
pub const DEFAULT_ERROR_CODE: u16 = 0;

/// Client message shared by both login failure modes
pub const LOGIN_FAILED_MESSAGE: &str = "invalid username or password";

/// Errors returned by the auth service operations
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Human-readable error message
        message: String,
    },

    /// Password failed the entropy bar
    #[error("weak credential: {message}")]
    WeakCredential {
        /// Human-readable error message
        message: String,
    },

    /// Password did not match the stored hash
    #[error("invalid credential")]
    InvalidCredential,

    /// The referenced account does not exist
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// The username is already taken
    #[error("username is taken")]
    AlreadyExists,

    /// Token framing, signature or expiry failed
    #[error(transparent)]
    InvalidToken(TokenError),

    /// A store call exceeded its deadline
    #[error("store operation timed out")]
    Timeout,

    /// Unrecoverable infrastructure failure
    #[error("fatal: {message}")]
    Fatal {
        /// Human-readable error message
        message: String,
    },
}

impl AuthError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. }
            | Self::WeakCredential { .. }
            | Self::InvalidCredential
            | Self::NotFound { .. }
            | Self::InvalidToken(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            Self::Fatal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Application-level error code
    pub fn code(&self) -> u16 {
        DEFAULT_ERROR_CODE
    }

    /// Message safe to return to clients
    ///
    /// Token failures collapse into one message so callers cannot tell a
    /// forged token from an expired one.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { message }
            | Self::WeakCredential { message }
            | Self::NotFound { message } => message.clone(),
            Self::InvalidCredential => LOGIN_FAILED_MESSAGE.to_string(),
            Self::AlreadyExists => "username is taken".to_string(),
            Self::InvalidToken(_) => "invalid token".to_string(),
            Self::Timeout => "service temporarily unavailable, try again".to_string(),
            Self::Fatal { .. } => "internal server error".to_string(),
        }
    }

    /// Whether this error means the process can no longer serve requests
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }
}

impl From<SharedError> for AuthError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { message, .. } => Self::InvalidInput { message },
            SharedError::WeakCredential { message } => Self::WeakCredential { message },
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(e) => Self::fatal(format!("failed signing token: {}", e)),
            TokenError::ExpiryOutOfRange => Self::fatal("token expiry out of range"),
            other => Self::InvalidToken(other),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::Database(e) => Self::fatal(format!("secret store failure: {}", e)),
        }
    }
}
