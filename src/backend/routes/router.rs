/**
 * Router Configuration
 *
 * Combines the API routes with request tracing and a JSON 404 fallback.
 */

use axum::{http::StatusCode, response::Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::types::DEFAULT_ERROR_CODE;
use crate::backend::error::ErrorBody;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    configure_api_routes(Router::new())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            status: StatusCode::NOT_FOUND.as_u16(),
            code: DEFAULT_ERROR_CODE,
            msg: "not found".to_string(),
        }),
    )
}
