/**
 * API Route Handlers
 *
 * ## Authentication
 * - `POST /api/v1/auth/check` - Validate a bearer token
 * - `POST /api/v1/auth/login` - Exchange credentials for a token
 * - `POST /api/v1/auth/register` - Create an account (sponsor token required)
 */

use axum::{routing::post, Router};

use crate::backend::auth::{check, login, register};
use crate::backend::server::state::AppState;

/// Base path of the versioned API
pub const API_PREFIX: &str = "/api/v1";

/// Add the auth routes to `router`
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    let auth = Router::new()
        .route("/auth/check", post(check))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register));

    router.nest(API_PREFIX, auth)
}
