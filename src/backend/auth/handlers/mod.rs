//! Authentication Handlers Module
//!
//! Thin axum handlers over [`crate::backend::auth::service::AuthService`].
//! They pull the `Authorization` header and JSON body out of the request,
//! call the service, and log failures with the request path.
//!
//! # Handlers
//!
//! - **`check`** - POST /api/v1/auth/check - Validate a bearer token
//! - **`login`** - POST /api/v1/auth/login - Exchange credentials for a token
//! - **`register`** - POST /api/v1/auth/register - Sponsored account creation

use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Request and response types
pub mod types;

/// Token check handler
pub mod check;

/// Login handler
pub mod login;

/// Register handler
pub mod register;

pub use types::{CredentialsRequest, TokenResponse};

pub use check::check;
pub use login::login;
pub use register::register;

/// `Authorization` header value, empty if absent or not valid UTF-8
pub(crate) fn authorization(headers: &HeaderMap) -> &str {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
}
