/**
 * Error Conversion
 *
 * `AuthError` implements `IntoResponse` so handlers can return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "status": 400,
 *   "code": 0,
 *   "msg": "invalid token"
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::backend::error::types::AuthError;

/// Uniform error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub code: u16,
    pub msg: String,
}

impl From<&AuthError> for ErrorBody {
    fn from(err: &AuthError) -> Self {
        Self {
            status: err.status_code().as_u16(),
            code: err.code(),
            msg: err.message(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
