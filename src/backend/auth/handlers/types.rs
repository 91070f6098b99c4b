/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the login and register handlers.
 */

use serde::{Deserialize, Serialize};

/// Username/password body used by login and register
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// JWT, valid for 5 minutes; send as `Authorization: Bearer <token>`
    pub token: String,
}
