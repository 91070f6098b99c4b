/**
 * Login Handler
 *
 * POST /api/v1/auth/login
 *
 * Inputs are trimmed but not re-validated against the current username
 * and password rules, so older accounts keep working.
 *
 * # Example Request
 *
 * ```http
 * POST /api/v1/auth/login HTTP/1.1
 * Content-Type: application/json
 *
 * { "username": "alice", "password": "Correct-Horse-42" }
 * ```
 *
 * # Example Response
 *
 * ```json
 * { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
 * ```
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::Uri,
    response::Json,
};

use crate::backend::auth::handlers::types::{CredentialsRequest, TokenResponse};
use crate::backend::error::AuthError;
use crate::backend::server::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!("Rejected login body: {}", e);
        state.reject(&uri, AuthError::invalid_input("invalid body"))
    })?;

    let token = state
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(|e| state.reject(&uri, e))?;

    Ok(Json(TokenResponse { token }))
}
