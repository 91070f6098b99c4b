//! Shared Error Types
//!
//! Errors raised by the pure credential rules in [`crate::shared::validators`].
//! They carry no HTTP knowledge; the backend maps them onto its own
//! `AuthError` at the service boundary.
//!
//! # Error Categories
//!
//! - `ValidationError` - a field is missing, malformed or too short
//! - `WeakCredential` - a password is well-formed but too guessable
//!
//! # Usage
//!
//! ```rust
//! use twirl::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "username must be at least 2 characters");
//! assert!(error.to_string().contains("username"));
//! ```
use thiserror::Error;

/// Errors produced while validating credentials
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Input failed a syntactic rule
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Password entropy is below the required bar
    #[error("Weak credential: {message}")]
    WeakCredential {
        /// Human-readable error message, including improvement hints
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new weak credential error
    pub fn weak(message: impl Into<String>) -> Self {
        Self::WeakCredential {
            message: message.into(),
        }
    }

    /// The message meant for clients, without the field prefix
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::WeakCredential { message } => message,
        }
    }
}
